use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the quotegram binary.
#[derive(Debug, Parser)]
#[command(name = "quotegram", version, about = "Scheduled quote-of-the-day image bot")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "QUOTEGRAM_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    /// Directory holding `blackboard.jpg` and `logo.png`.
    #[arg(long = "assets-path", env = "ASSETS_PATH", value_name = "PATH", global = true)]
    pub assets_path: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Subcommand; defaults to `run`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Debug, Subcommand, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the scheduler and post on every trigger.
    Run(ModeArgs),
    /// Run a single tick and exit.
    Once(ModeArgs),
}

/// Flags shared by `run` and `once`.
#[derive(Debug, Args, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeArgs {
    /// Use the sample quote and the test cadence, and never publish.
    #[arg(long)]
    pub test: bool,
}

impl CliArgs {
    /// Selected subcommand; `run` when none was given.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Run(ModeArgs::default()))
    }
}
