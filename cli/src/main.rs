use clap::Parser;
use std::process::ExitCode;
use toepub_cli::Cli;
use toepub_cli::command::Commands;

fn main() -> ExitCode {
    let cli = Cli::parse();
    toepub_cli::init_logging(cli.verbose);

    match cli.commands {
        Commands::Convert(convert) => convert.run(),
        Commands::Version(version) => version.run(),
    }
}
