//! Command-line entry point.

pub mod check;
pub mod command;
pub mod output;
pub mod report;
pub mod run;

use command::{CheckCommand, Cli, Commands};

use crate::error::Result;

/// Apply global flags and run the selected command.
pub async fn dispatch(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Report(args) => report::execute(&args),
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
    }
}
