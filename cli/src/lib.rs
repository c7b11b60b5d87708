use clap::Parser;
use env_logger::{Env, Target};
use log::LevelFilter;

pub mod command;
pub mod convert;
pub mod image;
pub mod output;
pub mod source;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log build phases to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub commands: command::Commands,
}

/// Logs go to stderr; `RUST_LOG` applies unless `verbose` forces `debug`.
pub fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr);

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}
