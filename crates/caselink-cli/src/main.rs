//! Caselink CLI - Command-line interface for the forensic case-link graph.

use caselink_cli::commands;
use caselink_cli::repl;
use caselink_cli::{Backend, Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> caselink_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Override profile for this invocation only
    if let Some(profile_name) = cli.profile {
        if !config.profiles.contains_key(&profile_name) {
            return Err(caselink_cli::CliError::Config(format!(
                "Profile '{}' not found",
                profile_name
            )));
        }
        config.active_profile = profile_name;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut config, &formatter).await?;
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter).await?;
        }
        Some(Command::Resolve(args)) => {
            commands::execute_resolve(&args, &formatter)?;
        }
        Some(cmd) => {
            // Commands that need a record source
            let mut backend = Backend::open(config.get_active_profile()?)?;

            match cmd {
                Command::Links(args) => {
                    commands::execute_links(&args, &backend, &config, &formatter).await?;
                }
                Command::Summary => {
                    commands::execute_summary(&backend, &config, &formatter).await?;
                }
                Command::Graph(args) => {
                    commands::execute_graph(&args, &backend, &config, &formatter).await?;
                }
                Command::Import(args) => {
                    commands::execute_import(&args, &mut backend, &formatter)?;
                }
                Command::Repl | Command::Profile(_) | Command::Resolve(_) => {}
            }
        }
    }

    Ok(())
}
