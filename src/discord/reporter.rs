//! User-facing error reporting.
//!
//! Converts dispatch failures into channel notices instead of letting
//! them take the process down. Debug mode is the exception: unknown
//! errors re-raise there so they stay visible to developers.

use std::time::Duration;

use serenity::client::Context;
use serenity::model::id::ChannelId;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::common::error::DispatchError;

/// How long auto-expiring notices stay in the channel.
const NOTICE_TTL: Duration = Duration::from_secs(15);

/// A user-facing notice derived from a dispatch failure.
#[derive(Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    /// Expiring notices are deleted again after [`NOTICE_TTL`].
    pub expiring: bool,
}

/// Map a dispatch failure to its notice.
pub fn notice_for(error: &DispatchError) -> Notice {
    match error {
        DispatchError::CommandNotFound { .. } => Notice {
            text: "This command doesn't exist".to_string(),
            expiring: true,
        },
        DispatchError::MissingPermissions => Notice {
            text: "You don't have permission to do that!".to_string(),
            expiring: true,
        },
        DispatchError::MissingRole => Notice {
            text: "You don't have the correct role to use that command!".to_string(),
            expiring: true,
        },
        DispatchError::CheckFailure => Notice {
            text: "I'm afraid you aren't allowed to use that command.".to_string(),
            expiring: true,
        },
        DispatchError::Domain { message } => Notice {
            text: message.clone(),
            expiring: true,
        },
        DispatchError::Platform(source) => Notice {
            text: source.to_string(),
            expiring: false,
        },
    }
}

/// Report a dispatch failure to the originating channel.
///
/// Unknown platform errors are logged in full and, in debug mode,
/// re-raised after the notice so the process fails loud.
pub async fn report(ctx: &Context, channel_id: ChannelId, error: &DispatchError, debug: bool) {
    if let DispatchError::Platform(source) = error {
        error!("Unknown command error: {:?}", source);
    }

    let notice = notice_for(error);
    match channel_id.say(&ctx.http, notice.text).await {
        Ok(message) if notice.expiring => {
            let http = ctx.http.clone();
            tokio::spawn(async move {
                sleep(NOTICE_TTL).await;
                if let Err(delete_error) = message.delete(&http).await {
                    warn!("Failed to expire notice: {}", delete_error);
                }
            });
        }
        Ok(_) => {}
        Err(send_error) => {
            warn!(
                "Failed to report error to channel {}: {}",
                channel_id, send_error
            );
        }
    }

    if debug {
        if let DispatchError::Platform(source) = error {
            panic!("debug mode: unhandled command error: {}", source);
        }
    }
}
