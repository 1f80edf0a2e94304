//! Discord bot integration.
//!
//! Event handling, command dispatch, and user-facing error reporting
//! for the single-guild community bot.

pub mod client;
pub mod commands;
pub mod dispatcher;
pub mod emotes;
pub mod handler;
pub mod reporter;
pub mod state;
