//! Quartermaster - community helper bot for a single Discord server.
//!
//! Listens for prefixed text commands, hands out self-assignable
//! roles, and adds vote reactions to new posts in the application
//! channel.

mod common;
mod config;
mod discord;
mod roles;
mod runtime;

use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use config::{env::get_config_path, load_and_validate};
use discord::client;
use discord::handler::ReadyReport;
use roles::RoleDirectory;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let start = Instant::now();
    info!("Quartermaster v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} exists and is properly formatted.", config_path);
        e
    })?;

    let directory = RoleDirectory::from_entries(&config.roles)?;

    info!("Configuration loaded successfully");
    info!("  Command prefix: \"{}\"", config.prefix());
    info!(
        "  Self-assignable roles: {}",
        directory.self_assignable_names().len()
    );
    if config.debug() {
        info!("  > Debug mode is enabled.");
    }

    // Build the client; the handler reports readiness over this channel
    let (ready_tx, ready_rx) = oneshot::channel::<ReadyReport>();
    let client = client::build_client(&config, directory, ready_tx).await?;
    let shard_manager = client.shard_manager.clone();

    let mut gateway_task = tokio::spawn(async move {
        client::run(client).await;
    });

    info!("Connecting to Discord...");
    match tokio::time::timeout(Duration::from_secs(60), ready_rx).await {
        Ok(Ok(ReadyReport::Connected(guild_count))) => {
            info!(
                "Startup complete: serving {} guild(s), took {:.2}s",
                guild_count,
                start.elapsed().as_secs_f64()
            );
        }
        Ok(Ok(ReadyReport::NoGuilds)) => {
            error!("The bot is not connected to any server - check the bot invite");
            shard_manager.shutdown_all().await;
            anyhow::bail!("not connected to any guild");
        }
        Ok(Err(_)) => {
            error!("Gateway task stopped before the ready event");
            anyhow::bail!("gateway closed before ready");
        }
        Err(_) => {
            error!("Timed out waiting for the Discord connection (60s)");
            shard_manager.shutdown_all().await;
            anyhow::bail!("connection timed out");
        }
    }

    // Run until a shutdown signal arrives or the client gives up
    let shutdown = tokio::select! {
        biased;
        _ = shutdown_signal() => {
            info!("Shutdown signal received - closing Discord session...");
            true
        }
        _ = &mut gateway_task => false,
    };

    if shutdown {
        shard_manager.shutdown_all().await;
        match tokio::time::timeout(Duration::from_secs(5), gateway_task).await {
            Ok(Ok(())) => info!("Discord session closed gracefully"),
            Ok(Err(join_error)) => warn!("Discord task panicked: {}", join_error),
            Err(_) => warn!("Discord session close timed out"),
        }
    } else {
        warn!("Discord client stopped on its own");
    }

    info!("done");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
