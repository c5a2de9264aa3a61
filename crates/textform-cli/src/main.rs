//! Textform CLI - extract typed fields from free text via an LLM.

use clap::Parser;
use textform_cli::commands;
use textform_cli::repl;
use textform_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config; a malformed file is left in place so user edits survive
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: could not read config, using defaults: {}", e);
        Config::default()
    });

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
            repl::run_repl(&config, &formatter).await?;
        }
        Some(Command::Analyze(args)) => {
            commands::execute_analyze(args, &config, &formatter).await?;
        }
        Some(Command::Schema(args)) => {
            commands::execute_schema(args, &formatter)?;
        }
        Some(Command::Key(args)) => {
            commands::execute_key(args, &formatter)?;
        }
        Some(Command::Access(args)) => {
            commands::execute_access(args, &config, &formatter)?;
        }
    }

    Ok(())
}
