//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::ExecutionMode;

/// Model-vs-market edge trader for binary up/down markets
#[derive(Parser, Debug)]
#[command(name = "driftline")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a trading session (foreground)
    Run(RunArgs),

    /// Summarize orders, fills, positions and PnL from the session database
    Report(ReportArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate a configuration file and print the effective values.
    Config(ConfigPathArg),
}

#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the execution mode.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Override the log level (e.g. debug, info, warn).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,

    /// Stop after this many hours.
    #[arg(long)]
    pub hours: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Path to the configuration file (used for the database path).
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Read this database instead of the configured one.
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Only count orders and fills placed in this mode.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    Paper,
    Live,
}

impl From<ModeArg> for ExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Paper => Self::Paper,
            ModeArg::Live => Self::Live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_overrides() {
        let cli = Cli::try_parse_from([
            "driftline", "run", "--config", "c.toml", "--mode", "live", "--log-level", "debug",
            "--json-logs", "--hours", "1.5",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, PathBuf::from("c.toml"));
        assert_eq!(args.mode, Some(ModeArg::Live));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.json_logs);
        assert_eq!(args.hours, Some(1.5));
    }

    #[test]
    fn parses_report_filter() {
        let cli = Cli::try_parse_from(["driftline", "report", "--db", "s.db", "--mode", "paper"]).unwrap();

        let Commands::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.db, Some(PathBuf::from("s.db")));
        assert_eq!(args.mode.map(ExecutionMode::from), Some(ExecutionMode::Paper));
    }

    #[test]
    fn parses_check_config() {
        let cli = Cli::try_parse_from(["driftline", "check", "config", "-c", "x.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(CheckCommand::Config(_))));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["driftline", "run", "--mode", "sim"]).is_err());
    }
}
