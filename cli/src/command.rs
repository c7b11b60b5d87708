use clap::Subcommand;

mod convert;
mod version;

pub use convert::ConvertCommand;
pub use version::VersionCommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert XHTML/HTML files or directories into an EPUB.
    Convert(ConvertCommand),
    /// Print the version.
    Version(VersionCommand),
}
