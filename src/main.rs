// Main entry point for teacup-report

use anyhow::Result;
use clap::Parser;
use tracing::info;

use teacup_report::cli::{Cli, Commands, ReplayArgs};
use teacup_report::config::{self, Config};
use teacup_report::report::{FileReporter, Reporter};
use teacup_report::state::TestNode;
use teacup_report::{logging, replay};

fn main() -> Result<()> {
    // Load configuration from file (if exists)
    let config = Config::load();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        logging::VERBOSE_FILTER.to_string()
    } else {
        config
            .as_ref()
            .map(|c| c.logging.filter.clone())
            .unwrap_or_else(config::default_filter)
    };
    logging::init(&filter);

    if cli.verbose {
        info!("Starting teacup-report v{}", env!("CARGO_PKG_VERSION"));
    }

    if cli.config {
        print_config(config.as_ref());
        return Ok(());
    }

    if let Some(config_file) = cli.init_config {
        let toml_content = Config::default().to_toml();
        std::fs::write(&config_file, toml_content)?;
        println!("Configuration file created: {}", config_file.display());
        println!("\nYou can now edit the file to customize your settings.");
        return Ok(());
    }

    if let Some(shell_type) = cli.completion {
        handle_completion(&shell_type)?;
        return Ok(());
    }

    match &cli.command {
        Some(Commands::Replay(args)) => handle_replay(args, &config.unwrap_or_default()),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn handle_replay(args: &ReplayArgs, config: &Config) -> Result<()> {
    let mut reporter: FileReporter<TestNode> =
        FileReporter::with_root(config.run_dir(args.root.as_deref()));

    let count = replay::replay_file(&args.events, &mut reporter)?;
    // A stream without `terminated` still gets its summary written.
    if reporter.root_path().is_some() {
        reporter.terminated();
    }

    println!("Replayed {} events into {}", count, reporter.run_dir().display());
    Ok(())
}

fn print_config(config: Option<&Config>) {
    println!("Current configuration:");

    if let Some(cfg) = config {
        println!("\n  Configuration file loaded:");
        if let Some(ref root) = cfg.reporter.root {
            println!("    Root: {}", root.display());
        }
        if let Some(ref base_dir) = cfg.reporter.base_dir {
            println!("    Base directory: {}", base_dir.display());
        }
        println!("    Log filter: {}", cfg.logging.filter);
    } else {
        println!("\n  No configuration file loaded");
        println!("  Create one with: teacup-report --init-config .teacuprc.toml");
    }

    println!("\n  Environment variables:");
    match std::env::var(config::ENV_TEACUP_LOG_ROOT) {
        Ok(root) => println!("    {}: {}", config::ENV_TEACUP_LOG_ROOT, root),
        Err(_) => println!(
            "    {}: not set (default: {})",
            config::ENV_TEACUP_LOG_ROOT,
            config::default_base_dir().join("<timestamp>").display()
        ),
    }

    println!("\nRoot directory precedence:");
    println!("  1. --root argument (highest)");
    println!("  2. Configuration file root");
    println!("  3. {}", config::ENV_TEACUP_LOG_ROOT);
    println!("  4. Timestamped directory below base_dir or ~/.teacup/logs (lowest)");
}

fn handle_completion(shell_type: &str) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{Shell, generate};

    let shell = match shell_type {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "elvish" => Shell::Elvish,
        "powershell" => Shell::PowerShell,
        _ => {
            eprintln!("Error: Unsupported shell type '{}'", shell_type);
            eprintln!("Supported shells: bash, zsh, fish, elvish, powershell");
            return Err(anyhow::anyhow!("Unsupported shell type"));
        }
    };

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, &bin_name, &mut std::io::stdout());

    Ok(())
}
