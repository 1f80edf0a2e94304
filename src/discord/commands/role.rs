//! Self-service role command.
//!
//! `role list` shows the roles members may manage on themselves,
//! `role add <name>` and `role remove <name>` mutate the invoker's own
//! roles after a fixed sequence of checks. All argument validation is
//! answered inline; only unexpected platform errors escape to the
//! reporter.

use reqwest::StatusCode;
use serenity::client::Context;
use serenity::http::HttpError;
use serenity::model::channel::Message;
use serenity::model::id::RoleId;
use tracing::info;

use crate::common::error::DispatchError;
use crate::discord::state::BotState;
use crate::roles::RoleDirectory;

pub const MSG_INVALID_ACTION: &str = "Invalid action.";
pub const MSG_NO_ROLE_GIVEN: &str = "You have not specified a role.";
pub const MSG_NO_SUCH_ROLE: &str = "I am sorry but i am afraid that role does not exist.";
pub const MSG_NOT_SELF_ASSIGNABLE: &str =
    "I am sorry but i am afraid you cannot add/remove that role to yourself using the bot.";
pub const MSG_ALREADY_HAS_ROLE: &str = "I am sorry but you already have this role.";
pub const MSG_DOES_NOT_HAVE_ROLE: &str = "I am sorry but you don't have this role.";
pub const MSG_MISSING_PERMISSIONS: &str = "Missing permissions";

/// Action requested by the invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAction {
    List,
    Add,
    Remove,
}

impl RoleAction {
    /// Case-insensitive parse.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "list" => Some(Self::List),
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }
}

/// What the command should do, decided before any platform call.
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    /// A check failed; answer with this text and stop.
    Reject(&'static str),
    /// Answer with the self-assignable role list.
    List,
    /// Add the role to the invoker.
    Grant(RoleId),
    /// Remove the role from the invoker.
    Revoke(RoleId),
}

/// Run the validation pipeline over explicit inputs.
///
/// Checks run in a fixed order and the first failure wins: action
/// validity, argument presence, existence on the guild, self-service
/// eligibility, then the invoker's current roles. `list` skips the
/// argument and current-role checks.
pub fn evaluate(
    action: Option<RoleAction>,
    role_name: &str,
    directory: &RoleDirectory,
    guild_role_names: &[String],
    member_roles: &[RoleId],
) -> Verdict {
    let Some(action) = action else {
        return Verdict::Reject(MSG_INVALID_ACTION);
    };

    if action == RoleAction::List {
        return Verdict::List;
    }

    if role_name.is_empty() {
        return Verdict::Reject(MSG_NO_ROLE_GIVEN);
    }

    if !guild_role_names.iter().any(|name| name == role_name) {
        return Verdict::Reject(MSG_NO_SUCH_ROLE);
    }

    let entry = match directory.get(role_name) {
        Some(entry) if entry.self_assignable => entry,
        _ => return Verdict::Reject(MSG_NOT_SELF_ASSIGNABLE),
    };

    let has_role = member_roles.contains(&entry.id);
    match action {
        RoleAction::Add if has_role => Verdict::Reject(MSG_ALREADY_HAS_ROLE),
        RoleAction::Add => Verdict::Grant(entry.id),
        RoleAction::Remove if !has_role => Verdict::Reject(MSG_DOES_NOT_HAVE_ROLE),
        RoleAction::Remove => Verdict::Revoke(entry.id),
        RoleAction::List => Verdict::List,
    }
}

/// Execute the role command end to end.
pub async fn run(
    ctx: &Context,
    msg: &Message,
    args: &[&str],
    state: &BotState,
) -> Result<(), DispatchError> {
    let guild_id = msg.guild_id.ok_or(DispatchError::CheckFailure)?;

    let action = args.first().and_then(|token| RoleAction::parse(token));
    let role_name = args.get(1..).unwrap_or_default().join(" ");

    let guild_role_names: Vec<String> = ctx
        .cache
        .guild(guild_id)
        .map(|guild| guild.roles.values().map(|role| role.name.clone()).collect())
        .unwrap_or_default();
    let member_roles: Vec<RoleId> = msg
        .member
        .as_deref()
        .map(|member| member.roles.clone())
        .unwrap_or_default();

    let verdict = evaluate(
        action,
        &role_name,
        &state.directory,
        &guild_role_names,
        &member_roles,
    );

    match verdict {
        Verdict::Reject(text) => {
            msg.channel_id.say(&ctx.http, text).await?;
        }
        Verdict::List => {
            let names = state.directory.self_assignable_names();
            let reply = if names.is_empty() {
                "There are no self-assignable roles.".to_string()
            } else {
                format!("Self-assignable roles: {}", names.join(", "))
            };
            msg.channel_id.say(&ctx.http, reply).await?;
        }
        Verdict::Grant(role_id) => {
            let mutation = ctx
                .http
                .add_member_role(guild_id, msg.author.id, role_id, Some("self-assigned"))
                .await;
            match mutation {
                Ok(()) => {
                    info!("Granted role '{}' to {}", role_name, msg.author.name);
                    let reply = format!(
                        "You have been successfully given the role `{}`! Congratulations!",
                        role_name
                    );
                    msg.channel_id.say(&ctx.http, reply).await?;
                }
                Err(error) if is_permission_denied(&error) => {
                    msg.channel_id.say(&ctx.http, MSG_MISSING_PERMISSIONS).await?;
                }
                Err(error) => return Err(error.into()),
            }
        }
        Verdict::Revoke(role_id) => {
            let mutation = ctx
                .http
                .remove_member_role(guild_id, msg.author.id, role_id, Some("self-removed"))
                .await;
            match mutation {
                Ok(()) => {
                    info!("Removed role '{}' from {}", role_name, msg.author.name);
                    let reply = format!(
                        "The role `{}` has successfully been removed! Congratulations!",
                        role_name
                    );
                    msg.channel_id.say(&ctx.http, reply).await?;
                }
                Err(error) if is_permission_denied(&error) => {
                    msg.channel_id.say(&ctx.http, MSG_MISSING_PERMISSIONS).await?;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    Ok(())
}

/// Discord answers role mutations the bot lacks permission for with 403.
fn is_permission_denied(error: &serenity::Error) -> bool {
    matches!(
        error,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code == StatusCode::FORBIDDEN
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::RoleConfig;

    fn make_directory() -> RoleDirectory {
        RoleDirectory::from_entries(&[
            RoleConfig {
                name: "Notify".to_string(),
                id: 10,
                self_assignable: Some(true),
            },
            RoleConfig {
                name: "Map Art".to_string(),
                id: 11,
                self_assignable: Some(true),
            },
            RoleConfig {
                name: "Moderator".to_string(),
                id: 12,
                self_assignable: Some(false),
            },
        ])
        .unwrap()
    }

    fn guild_roles() -> Vec<String> {
        ["Notify", "Map Art", "Moderator", "Unlisted"]
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn test_action_parse_is_case_insensitive() {
        assert_eq!(RoleAction::parse("LIST"), Some(RoleAction::List));
        assert_eq!(RoleAction::parse("Add"), Some(RoleAction::Add));
        assert_eq!(RoleAction::parse("remove"), Some(RoleAction::Remove));
        assert_eq!(RoleAction::parse("destroy"), None);
    }

    #[test]
    fn test_invalid_action_rejected_first() {
        // Even with an otherwise-valid role name.
        let verdict = evaluate(
            None,
            "Notify",
            &make_directory(),
            &guild_roles(),
            &[],
        );
        assert_eq!(verdict, Verdict::Reject(MSG_INVALID_ACTION));
    }

    #[test]
    fn test_add_without_role_name_rejected() {
        let verdict = evaluate(
            Some(RoleAction::Add),
            "",
            &make_directory(),
            &guild_roles(),
            &[],
        );
        assert_eq!(verdict, Verdict::Reject(MSG_NO_ROLE_GIVEN));
    }

    #[test]
    fn test_remove_without_role_name_rejected() {
        let verdict = evaluate(
            Some(RoleAction::Remove),
            "",
            &make_directory(),
            &guild_roles(),
            &[],
        );
        assert_eq!(verdict, Verdict::Reject(MSG_NO_ROLE_GIVEN));
    }

    #[test]
    fn test_list_needs_no_role_name() {
        let verdict = evaluate(
            Some(RoleAction::List),
            "",
            &make_directory(),
            &guild_roles(),
            &[],
        );
        assert_eq!(verdict, Verdict::List);
    }

    #[test]
    fn test_list_unaffected_by_member_roles() {
        let holding_everything = [RoleId::new(10), RoleId::new(11), RoleId::new(12)];
        let verdict = evaluate(
            Some(RoleAction::List),
            "",
            &make_directory(),
            &guild_roles(),
            &holding_everything,
        );
        assert_eq!(verdict, Verdict::List);
    }

    #[test]
    fn test_role_missing_from_guild_rejected() {
        // Directory contents are irrelevant when the guild lacks the role.
        let verdict = evaluate(
            Some(RoleAction::Add),
            "Notify",
            &make_directory(),
            &["Something Else".to_string()],
            &[],
        );
        assert_eq!(verdict, Verdict::Reject(MSG_NO_SUCH_ROLE));
    }

    #[test]
    fn test_role_not_in_directory_rejected() {
        let verdict = evaluate(
            Some(RoleAction::Add),
            "Unlisted",
            &make_directory(),
            &guild_roles(),
            &[],
        );
        assert_eq!(verdict, Verdict::Reject(MSG_NOT_SELF_ASSIGNABLE));
    }

    #[test]
    fn test_non_self_assignable_role_rejected() {
        let verdict = evaluate(
            Some(RoleAction::Add),
            "Moderator",
            &make_directory(),
            &guild_roles(),
            &[],
        );
        assert_eq!(verdict, Verdict::Reject(MSG_NOT_SELF_ASSIGNABLE));
    }

    #[test]
    fn test_add_while_holding_role_rejected() {
        let verdict = evaluate(
            Some(RoleAction::Add),
            "Notify",
            &make_directory(),
            &guild_roles(),
            &[RoleId::new(10)],
        );
        assert_eq!(verdict, Verdict::Reject(MSG_ALREADY_HAS_ROLE));
    }

    #[test]
    fn test_remove_without_holding_role_rejected() {
        let verdict = evaluate(
            Some(RoleAction::Remove),
            "Notify",
            &make_directory(),
            &guild_roles(),
            &[RoleId::new(11)],
        );
        assert_eq!(verdict, Verdict::Reject(MSG_DOES_NOT_HAVE_ROLE));
    }

    #[test]
    fn test_add_resolves_id_through_directory() {
        let verdict = evaluate(
            Some(RoleAction::Add),
            "Notify",
            &make_directory(),
            &guild_roles(),
            &[],
        );
        assert_eq!(verdict, Verdict::Grant(RoleId::new(10)));
    }

    #[test]
    fn test_remove_resolves_id_through_directory() {
        let verdict = evaluate(
            Some(RoleAction::Remove),
            "Map Art",
            &make_directory(),
            &guild_roles(),
            &[RoleId::new(11)],
        );
        assert_eq!(verdict, Verdict::Revoke(RoleId::new(11)));
    }

    #[test]
    fn test_multiword_role_name_matches_exactly() {
        let verdict = evaluate(
            Some(RoleAction::Add),
            "Map Art",
            &make_directory(),
            &guild_roles(),
            &[],
        );
        assert_eq!(verdict, Verdict::Grant(RoleId::new(11)));

        let verdict = evaluate(
            Some(RoleAction::Add),
            "Map",
            &make_directory(),
            &guild_roles(),
            &[],
        );
        assert_eq!(verdict, Verdict::Reject(MSG_NO_SUCH_ROLE));
    }
}
