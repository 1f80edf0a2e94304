//! Discord event handling.
//!
//! Owns the single entry point for inbound messages and the ready
//! transition that turns message observation on.

use std::sync::{Arc, Mutex};

use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::gateway::ActivityData;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::discord::state::BotState;
use crate::discord::{dispatcher, reporter};
use crate::runtime::{RuntimeSnapshot, RuntimeState};

/// Outcome of the ready handshake reported back to main.
#[derive(Debug)]
pub enum ReadyReport {
    /// Connected; number of guilds serving.
    Connected(usize),
    /// Gateway session is up but no guild accepted the bot.
    NoGuilds,
}

/// Discord event handler.
pub struct BotHandler {
    /// Fires once, when the first ready event has been processed.
    ready_tx: Mutex<Option<oneshot::Sender<ReadyReport>>>,
}

impl BotHandler {
    pub fn new(ready_tx: oneshot::Sender<ReadyReport>) -> Self {
        Self {
            ready_tx: Mutex::new(Some(ready_tx)),
        }
    }

    fn send_ready_report(&self, report: ReadyReport) {
        if let Ok(mut slot) = self.ready_tx.lock() {
            if let Some(sender) = slot.take() {
                let _ = sender.send(report);
            }
        }
    }
}

#[async_trait]
impl EventHandler for BotHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        // The bot must never react to its own messages
        if msg.author.id == ctx.cache.current_user().id {
            return;
        }

        let Some((snapshot, state)) = read_shared(&ctx).await else {
            warn!("Shared state missing from context, dropping message");
            return;
        };

        // Until ready (and always in debug mode) inbound messages are inert
        if !snapshot.observing() {
            return;
        }

        if state.application_channel == Some(msg.channel_id) {
            add_vote_reactions(&ctx, &msg, &state).await;
        }

        if let Err(dispatch_error) = dispatcher::dispatch(&ctx, &msg, &state, snapshot).await {
            reporter::report(&ctx, msg.channel_id, &dispatch_error, snapshot.debug).await;
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Connected to Discord as {}", ready.user.name);

        let Some((_, state)) = read_shared(&ctx).await else {
            warn!("Shared state missing from context");
            return;
        };

        if let Some(text) = state.presence.as_deref() {
            ctx.set_activity(Some(ActivityData::playing(text)));
        }

        let guilds = &ready.guilds;
        if guilds.is_empty() {
            error!("The bot is not connected to any guild");
            self.send_ready_report(ReadyReport::NoGuilds);
            return;
        }

        info!("The bot has connected to {} guild(s):", guilds.len());
        for guild in guilds {
            info!("  > {}", guild.id);
        }

        // Single writer: only the ready path ever mutates the runtime state.
        let data = ctx.data.read().await;
        if let Some(runtime) = data.get::<RuntimeState>() {
            let mut runtime = runtime.write().await;
            if runtime.mark_ready() {
                info!(
                    "Message observation enabled ({:.2}s after start)",
                    runtime.elapsed_since_start().as_secs_f64()
                );
            }
        }
        drop(data);

        self.send_ready_report(ReadyReport::Connected(guilds.len()));
    }
}

/// Fetch the runtime snapshot and shared bot state from the context.
async fn read_shared(ctx: &Context) -> Option<(RuntimeSnapshot, Arc<BotState>)> {
    let data = ctx.data.read().await;
    let runtime = data.get::<RuntimeState>()?;
    let snapshot = runtime.read().await.snapshot();
    let state = data.get::<BotState>()?.clone();
    Some((snapshot, state))
}

/// Attach the configured vote emotes in order.
///
/// A failure on one emote must not block the remaining ones.
async fn add_vote_reactions(ctx: &Context, msg: &Message, state: &BotState) {
    for emote in &state.vote_emotes {
        if let Err(react_error) = msg.react(&ctx.http, emote.clone()).await {
            warn!("Failed to add vote reaction {}: {}", emote, react_error);
        }
    }
}
