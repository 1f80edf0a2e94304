//! Configuration type definitions.

use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    pub guild: GuildConfig,
    #[serde(default)]
    pub roles: Vec<RoleConfig>,
}

/// Discord connection and command settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub token: String,
    /// Command prefix, "/" when omitted.
    pub prefix: Option<String>,
    /// Debug mode suppresses user-facing side effects and fails loud.
    pub debug: Option<bool>,
    /// Presence text shown once connected.
    pub presence: Option<String>,
}

/// Guild-specific settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildConfig {
    /// Role members must hold before they may use the role command.
    pub member_role: u64,
    /// Channel whose posts get automatic vote reactions.
    pub application_channel: Option<u64>,
    /// Vote emotes, attached in this order. Unicode emoji or "name:id".
    pub vote_emotes: Option<Vec<String>>,
}

/// One entry of the self-service role directory.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleConfig {
    pub name: String,
    pub id: u64,
    /// Whether members may add/remove this role on themselves.
    pub self_assignable: Option<bool>,
}

impl Config {
    /// Command prefix with the default applied.
    pub fn prefix(&self) -> &str {
        self.discord.prefix.as_deref().unwrap_or("/")
    }

    /// Debug flag with the default applied.
    pub fn debug(&self) -> bool {
        self.discord.debug.unwrap_or(false)
    }
}
