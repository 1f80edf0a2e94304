//! Prefixed command parsing and routing.
//!
//! Recognizes the configured prefix, resolves the command name
//! case-insensitively against the command table, runs access checks,
//! and invokes the handler. Anything that goes wrong past parsing
//! surfaces as a [`DispatchError`] for the reporter.

use serenity::client::Context;
use serenity::model::channel::Message;
use serenity::model::id::RoleId;
use tracing::debug;

use crate::common::error::DispatchError;
use crate::discord::commands;
use crate::discord::state::BotState;
use crate::runtime::RuntimeSnapshot;

/// Access requirement checked before a handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Anyone in the guild.
    Everyone,
    /// Requires the configured member role.
    MemberRole,
    /// Requires guild administrator permission.
    Administrator,
}

/// Static description of one command.
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub gate: Gate,
}

/// Every command the bot understands.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "role",
        usage: "role <list|add|remove> [role name]",
        description: "List or self-assign notification roles.",
        gate: Gate::MemberRole,
    },
    CommandSpec {
        name: "help",
        usage: "help [command]",
        description: "Show this overview or help for one command.",
        gate: Gate::Everyone,
    },
    CommandSpec {
        name: "ping",
        usage: "ping",
        description: "Check whether the bot is alive.",
        gate: Gate::Everyone,
    },
    CommandSpec {
        name: "uptime",
        usage: "uptime",
        description: "Show how long the bot has been running.",
        gate: Gate::Everyone,
    },
    CommandSpec {
        name: "say",
        usage: "say <text>",
        description: "Repeat a message as the bot.",
        gate: Gate::Administrator,
    },
];

/// A parsed command invocation.
#[derive(Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Lowercased command name.
    pub name: String,
    /// Remaining whitespace-delimited tokens.
    pub args: Vec<&'a str>,
}

/// Split a prefixed message into command name and arguments.
///
/// Returns `None` for anything that is not a command.
pub fn parse<'a>(prefix: &str, content: &'a str) -> Option<Invocation<'a>> {
    let rest = content.strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    let name = tokens.next()?.to_lowercase();

    Some(Invocation {
        name,
        args: tokens.collect(),
    })
}

/// Find the spec for a command name (already lowercased).
pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Run the access checks for a command.
///
/// `member_roles` and `is_admin` come from the message's partial
/// member data; both are absent outside a guild.
pub fn check_access(
    spec: &CommandSpec,
    in_guild: bool,
    member_roles: &[RoleId],
    is_admin: bool,
    member_role: RoleId,
) -> Result<(), DispatchError> {
    if !in_guild {
        return Err(DispatchError::CheckFailure);
    }

    match spec.gate {
        Gate::Everyone => Ok(()),
        Gate::MemberRole if member_roles.contains(&member_role) => Ok(()),
        Gate::MemberRole => Err(DispatchError::MissingRole),
        Gate::Administrator if is_admin => Ok(()),
        Gate::Administrator => Err(DispatchError::MissingPermissions),
    }
}

/// Dispatch one inbound message.
///
/// Non-command messages are ignored. Command failures come back as a
/// [`DispatchError`] for the reporter.
pub async fn dispatch(
    ctx: &Context,
    msg: &Message,
    state: &BotState,
    snapshot: RuntimeSnapshot,
) -> Result<(), DispatchError> {
    let Some(invocation) = parse(&state.prefix, &msg.content) else {
        return Ok(());
    };

    let spec = find_command(&invocation.name).ok_or_else(|| DispatchError::CommandNotFound {
        name: invocation.name.clone(),
    })?;

    let member_roles: Vec<RoleId> = msg
        .member
        .as_deref()
        .map(|member| member.roles.clone())
        .unwrap_or_default();
    let is_admin = msg
        .member
        .as_deref()
        .and_then(|member| member.permissions)
        .map(|permissions| permissions.administrator())
        .unwrap_or(false);

    check_access(
        spec,
        msg.guild_id.is_some(),
        &member_roles,
        is_admin,
        state.member_role,
    )?;

    debug!(
        "Dispatching '{}' from {} with {} argument(s)",
        spec.name,
        msg.author.name,
        invocation.args.len()
    );

    match spec.name {
        "role" => commands::role::run(ctx, msg, &invocation.args, state).await,
        "help" => commands::misc::help(ctx, msg, &invocation.args).await,
        "ping" => commands::misc::ping(ctx, msg).await,
        "uptime" => commands::misc::uptime(ctx, msg, snapshot).await,
        "say" => commands::misc::say(ctx, msg, &invocation.args).await,
        name => Err(DispatchError::CommandNotFound {
            name: name.to_string(),
        }),
    }
}
