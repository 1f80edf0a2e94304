//! Discord client setup and run loop.
//!
//! Hides serenity wiring from the rest of the application: gateway
//! intents, HTTP timeouts, shared-state installation, and the
//! reconnect loop.

use std::sync::Arc;
use std::time::Duration;

use backon::BackoffBuilder;
use serenity::http::HttpBuilder;
use serenity::prelude::*;
use serenity::Client;
use tokio::sync::oneshot;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::discord::handler::{BotHandler, ReadyReport};
use crate::discord::state::BotState;
use crate::roles::RoleDirectory;
use crate::runtime::RuntimeState;

/// Build the serenity client with shared state installed.
pub async fn build_client(
    config: &Config,
    directory: RoleDirectory,
    ready_tx: oneshot::Sender<ReadyReport>,
) -> anyhow::Result<Client> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    // Build a custom reqwest client with timeout settings
    let reqwest_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let http = HttpBuilder::new(&config.discord.token)
        .client(reqwest_client)
        .build();

    let handler = BotHandler::new(ready_tx);
    let client = serenity::client::ClientBuilder::new_with_http(http, intents)
        .event_handler(handler)
        .await?;

    {
        let mut data = client.data.write().await;
        data.insert::<BotState>(Arc::new(BotState::new(config, directory)));
        data.insert::<RuntimeState>(Arc::new(RwLock::new(RuntimeState::new(config.debug()))));
    }

    Ok(client)
}

/// Run the client until it disconnects for good.
///
/// Serenity reconnects the gateway itself; this loop only restarts the
/// client after hard errors, with exponential backoff.
pub async fn run(mut client: Client) {
    /// 5s initial, 5min max, factor 1.1, with jitter, unlimited retries.
    fn gateway_backoff() -> impl Iterator<Item = Duration> {
        backon::ExponentialBuilder::default()
            .with_min_delay(Duration::from_secs(5))
            .with_max_delay(Duration::from_secs(300))
            .with_factor(1.1)
            .with_jitter()
            .without_max_times()
            .build()
    }

    let mut backoff = gateway_backoff();

    loop {
        info!("Starting Discord client...");
        match client.start().await {
            Ok(()) => {
                info!("Discord client disconnected normally");
                break;
            }
            Err(client_error) => {
                error!("Discord client error: {}", client_error);
                let delay = backoff.next().unwrap_or(Duration::from_secs(300));
                warn!("Restarting in {:.1}s...", delay.as_secs_f64());
                sleep(delay).await;
            }
        }
    }
}
