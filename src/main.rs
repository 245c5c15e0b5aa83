use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use freshet::app::AppContext;
use freshet::cli::{commands, Cli, Commands};
use freshet::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config = Arc::new(config);
    let ctx = Arc::new(AppContext::new(&config));

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            freshet::tui::run(ctx, config).await?;
        }
        Commands::List => {
            commands::list_entries(&ctx).await?;
        }
        Commands::Update => {
            commands::update_feeds(&ctx).await?;
        }
    }

    Ok(())
}
