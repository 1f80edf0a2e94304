//! Shared bot state kept in serenity's context data.

use std::sync::Arc;

use serenity::model::channel::ReactionType;
use serenity::model::id::{ChannelId, RoleId};
use serenity::prelude::TypeMapKey;

use crate::config::Config;
use crate::discord::emotes;
use crate::roles::RoleDirectory;

/// Immutable per-process bot state, built once from configuration.
pub struct BotState {
    /// Command prefix.
    pub prefix: String,
    /// Role members must hold to use the role command.
    pub member_role: RoleId,
    /// Channel that gets automatic vote reactions.
    pub application_channel: Option<ChannelId>,
    /// Vote reactions, in configured order.
    pub vote_emotes: Vec<ReactionType>,
    /// Presence text applied on ready.
    pub presence: Option<String>,
    /// Self-service role directory.
    pub directory: RoleDirectory,
}

impl BotState {
    pub fn new(config: &Config, directory: RoleDirectory) -> Self {
        Self {
            prefix: config.prefix().to_string(),
            member_role: RoleId::new(config.guild.member_role),
            application_channel: config.guild.application_channel.map(ChannelId::new),
            vote_emotes: emotes::parse_emotes(
                config.guild.vote_emotes.as_deref().unwrap_or_default(),
            ),
            presence: config.discord.presence.clone(),
            directory,
        }
    }
}

impl TypeMapKey for BotState {
    type Value = Arc<BotState>;
}
