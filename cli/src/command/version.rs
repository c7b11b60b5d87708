use clap::Args;
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct VersionCommand {}

impl VersionCommand {
    pub fn run(&self) -> ExitCode {
        println!("toepub {}", env!("CARGO_PKG_VERSION"));
        ExitCode::SUCCESS
    }
}
