mod commands;
mod config;
mod dispatch;
mod formatter;
mod transport;
mod update;
mod webhook;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::CommandTable;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::transport::TelegramSender;
use crate::webhook::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,telescope_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    info!("Configuration loaded successfully");
    info!("  Bind address: {}", config.bind_addr);

    let table = CommandTable::new();
    info!("  Registered commands: {}", table.len());

    let transport = Arc::new(TelegramSender::new(&config.bot_token));
    let dispatcher = Arc::new(Dispatcher::new(table, transport));
    let app = webhook::router(AppState { dispatcher });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Webhook listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("Server error")?;

    Ok(())
}
