// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Per-node file reports for test runs
#[derive(Parser, Debug)]
#[command(name = "teacup-report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Write test run logs into a directory tree mirroring the tests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Print shell completion (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "elvish", "powershell"])]
    pub completion: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded lifecycle event stream into a file report
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// JSON-lines file with one lifecycle event per line
    #[arg(value_name = "EVENTS")]
    pub events: PathBuf,

    /// Run directory to create (must not exist)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_replay() {
        let cli = Cli::parse_from(["teacup-report", "-v", "replay", "run.jsonl", "--root", "/tmp/r"]);
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Replay(args)) => {
                assert_eq!(args.events, PathBuf::from("run.jsonl"));
                assert_eq!(args.root, Some(PathBuf::from("/tmp/r")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
