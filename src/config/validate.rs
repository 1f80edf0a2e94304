//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use crate::common::error::ConfigError;
use crate::config::types::Config;
use crate::discord::emotes;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    // Validate Discord config
    if config.discord.token.is_empty() {
        errors.push("discord.token is required".to_string());
    }
    if config.discord.token == "YOUR_DISCORD_TOKEN_HERE" {
        errors.push("discord.token has not been configured (still using placeholder)".to_string());
    }
    if let Some(ref prefix) = config.discord.prefix {
        if prefix.is_empty() {
            errors.push("discord.prefix must not be empty".to_string());
        }
        if prefix.chars().any(char::is_whitespace) {
            errors.push("discord.prefix must not contain whitespace".to_string());
        }
    }

    // Validate guild config
    if config.guild.member_role == 0 {
        errors.push("guild.member_role must be non-zero".to_string());
    }
    if config.guild.application_channel == Some(0) {
        errors.push("guild.application_channel must be non-zero".to_string());
    }

    let vote_emotes = config.guild.vote_emotes.as_deref().unwrap_or_default();
    if config.guild.application_channel.is_some() && vote_emotes.is_empty() {
        errors.push(
            "guild.vote_emotes is required when guild.application_channel is set".to_string(),
        );
    }

    // Validate emote specs (try to parse them)
    for (i, spec) in vote_emotes.iter().enumerate() {
        if emotes::parse_emote(spec).is_none() {
            errors.push(format!(
                "guild.vote_emotes[{}] is not a valid emote: '{}' (use a unicode emoji or name:id)",
                i, spec
            ));
        }
    }

    // Validate role entries
    for (i, role) in config.roles.iter().enumerate() {
        if role.name.trim().is_empty() {
            errors.push(format!("roles[{}].name is required", i));
        }
        if role.id == 0 {
            errors.push(format!("roles[{}].id must be non-zero", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::*;

    fn make_valid_config() -> Config {
        Config {
            discord: DiscordConfig {
                token: "valid_token_here".to_string(),
                prefix: Some("/".to_string()),
                debug: Some(false),
                presence: None,
            },
            guild: GuildConfig {
                member_role: 42,
                application_channel: Some(700),
                vote_emotes: Some(vec!["👍".to_string(), "👎".to_string()]),
            },
            roles: vec![RoleConfig {
                name: "Notify".to_string(),
                id: 10,
                self_assignable: Some(true),
            }],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = make_valid_config();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_token_fails() {
        let mut config = make_valid_config();
        config.discord.token = String::new();

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("discord.token"));
    }

    #[test]
    fn test_placeholder_token_fails() {
        let mut config = make_valid_config();
        config.discord.token = "YOUR_DISCORD_TOKEN_HERE".to_string();

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("placeholder"));
    }

    #[test]
    fn test_whitespace_prefix_fails() {
        let mut config = make_valid_config();
        config.discord.prefix = Some("! ".to_string());

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("whitespace"));
    }

    #[test]
    fn test_zero_member_role_fails() {
        let mut config = make_valid_config();
        config.guild.member_role = 0;

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("member_role"));
    }

    #[test]
    fn test_application_channel_without_emotes_fails() {
        let mut config = make_valid_config();
        config.guild.vote_emotes = None;

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("vote_emotes"));
    }

    #[test]
    fn test_invalid_emote_fails() {
        let mut config = make_valid_config();
        config.guild.vote_emotes = Some(vec!["not an emoji".to_string()]);

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a valid emote"));
    }

    #[test]
    fn test_zero_role_id_fails() {
        let mut config = make_valid_config();
        config.roles[0].id = 0;

        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("roles[0].id"));
    }

    #[test]
    fn test_no_application_channel_needs_no_emotes() {
        let mut config = make_valid_config();
        config.guild.application_channel = None;
        config.guild.vote_emotes = None;

        assert!(validate_config(&config).is_ok());
    }
}
