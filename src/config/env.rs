//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `QUARTERMASTER_DISCORD_TOKEN` - Discord bot token
//! - `QUARTERMASTER_DEBUG` - debug mode flag ("true"/"false")

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "QUARTERMASTER";

/// Apply environment variable overrides to a config.
///
/// This allows the bot token to be provided via the environment
/// instead of the config file.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(token) = env::var(format!("{}_DISCORD_TOKEN", ENV_PREFIX)) {
        config.discord.token = token;
    }

    if let Ok(debug) = env::var(format!("{}_DEBUG", ENV_PREFIX)) {
        if let Ok(flag) = debug.parse() {
            config.discord.debug = Some(flag);
        }
    }

    config
}

/// Get the config file path from environment or use default.
///
/// Checks `QUARTERMASTER_CONFIG`, otherwise returns "quartermaster.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "quartermaster.conf".to_string())
}
