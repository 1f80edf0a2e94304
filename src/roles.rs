//! Self-service role directory.
//!
//! Static table mapping role display names to Discord role ids, loaded
//! once from configuration and immutable afterwards. Each entry carries
//! its own self-assignable flag, so eligibility and id resolution always
//! come from the same row.

use serenity::model::id::RoleId;

use crate::common::error::ConfigError;
use crate::config::types::RoleConfig;

/// One directory entry.
#[derive(Debug, Clone)]
pub struct RoleEntry {
    pub name: String,
    pub id: RoleId,
    pub self_assignable: bool,
}

/// Immutable role directory.
#[derive(Debug, Clone, Default)]
pub struct RoleDirectory {
    entries: Vec<RoleEntry>,
}

impl RoleDirectory {
    /// Build the directory from config entries.
    ///
    /// Duplicate names and zero ids are configuration errors.
    pub fn from_entries(entries: &[RoleConfig]) -> Result<Self, ConfigError> {
        let mut built: Vec<RoleEntry> = Vec::with_capacity(entries.len());

        for entry in entries {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "role directory entry with empty name".to_string(),
                });
            }
            if entry.id == 0 {
                return Err(ConfigError::ValidationError {
                    message: format!("role '{}' has a zero id", entry.name),
                });
            }
            if built.iter().any(|existing| existing.name == entry.name) {
                return Err(ConfigError::ValidationError {
                    message: format!("duplicate role directory entry '{}'", entry.name),
                });
            }

            built.push(RoleEntry {
                name: entry.name.clone(),
                id: RoleId::new(entry.id),
                self_assignable: entry.self_assignable.unwrap_or(false),
            });
        }

        Ok(Self { entries: built })
    }

    /// Look up an entry by its exact display name.
    pub fn get(&self, name: &str) -> Option<&RoleEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Names members may manage on themselves, in configured order.
    pub fn self_assignable_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.self_assignable)
            .map(|entry| entry.name.as_str())
            .collect()
    }
}
