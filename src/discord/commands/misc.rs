//! Small utility commands: help, ping, uptime, say.

use std::fmt::Write as _;
use std::time::Duration;

use serenity::client::Context;
use serenity::model::channel::Message;

use crate::common::error::DispatchError;
use crate::discord::dispatcher::{find_command, COMMANDS};
use crate::runtime::RuntimeSnapshot;

/// Show the command overview, or detail for one command.
pub async fn help(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), DispatchError> {
    if let Some(topic) = args.first() {
        let Some(spec) = find_command(&topic.to_lowercase()) else {
            return Err(DispatchError::Domain {
                message: format!("There is no command named `{}` to show help for.", topic),
            });
        };
        msg.channel_id
            .say(&ctx.http, format!("`{}` - {}", spec.usage, spec.description))
            .await?;
        return Ok(());
    }

    let mut overview = String::from("**Available commands:**\n");
    for spec in COMMANDS {
        let _ = writeln!(overview, "- `{}` - {}", spec.usage, spec.description);
    }
    msg.channel_id.say(&ctx.http, overview).await?;
    Ok(())
}

/// Liveness check.
pub async fn ping(ctx: &Context, msg: &Message) -> Result<(), DispatchError> {
    msg.channel_id.say(&ctx.http, "Pong!").await?;
    Ok(())
}

/// Report how long the bot has been running.
pub async fn uptime(
    ctx: &Context,
    msg: &Message,
    snapshot: RuntimeSnapshot,
) -> Result<(), DispatchError> {
    let reply = format!(
        "I have been running for {}.",
        format_duration(snapshot.started_at.elapsed())
    );
    msg.channel_id.say(&ctx.http, reply).await?;
    Ok(())
}

/// Repeat the given text as the bot.
pub async fn say(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), DispatchError> {
    if args.is_empty() {
        return Err(DispatchError::Domain {
            message: "You have not given me anything to say.".to_string(),
        });
    }
    msg.channel_id.say(&ctx.http, args.join(" ")).await?;
    Ok(())
}

/// Render a duration as "1d 2h 3m 4s", dropping leading zero units.
fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / 86_400;
    let hours = (total / 3_600) % 24;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 || !parts.is_empty() {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 || !parts.is_empty() {
        parts.push(format!("{}m", minutes));
    }
    parts.push(format!("{}s", seconds));
    parts.join(" ")
}
