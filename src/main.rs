//! User Service - Application entry point
//!
//! CLI-based entry point; without a subcommand the server is started.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use user_service::{
    cli::{Cli, Commands},
    commands,
    config::{Config, DEFAULT_LOG_FILTER},
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = Config::from_env();
    init_tracing(cli.verbose, config.json_logs);
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Some(Commands::Serve(args)) => commands::serve::execute(args, config).await,
        None => commands::serve::execute(Default::default(), config).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool, json_logs: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
    };

    let registry = tracing_subscriber::registry().with(EnvFilter::new(filter));
    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
