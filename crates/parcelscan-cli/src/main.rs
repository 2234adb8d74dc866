//! Parcelscan CLI - scan an inbox export for delivery emails.

use clap::Parser;
use parcelscan_cli::commands;
use parcelscan_cli::{Cli, Command, Config, Formatter};
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

async fn run() -> parcelscan_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => {
            commands::execute_run(args, &config, &formatter).await?;
        }
        Command::History(args) => {
            commands::execute_history(args, &config, &formatter)?;
        }
        Command::Stats(args) => {
            commands::execute_stats(args, &config, &formatter)?;
        }
        Command::Clear(args) => {
            commands::execute_clear(args, &config, &formatter)?;
        }
        Command::Cleanup(args) => {
            commands::execute_cleanup(args, &config, &formatter)?;
        }
    }

    Ok(())
}
