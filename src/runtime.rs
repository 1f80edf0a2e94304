//! Process-wide runtime flags.
//!
//! One writer (the ready path of the lifecycle controller), many
//! readers: event handlers take an immutable [`RuntimeSnapshot`] at
//! entry and never touch the shared state again.

use std::sync::Arc;
use std::time::Instant;

use serenity::prelude::{RwLock, TypeMapKey};

/// Mutable runtime state, written only by the lifecycle controller.
#[derive(Debug)]
pub struct RuntimeState {
    /// Gate for message observation. Flips to true exactly once, when
    /// the gateway connection is up.
    enabled: bool,
    /// Debug mode suppresses user-facing side effects and fails loud.
    debug: bool,
    /// Process start, for uptime reporting.
    started_at: Instant,
    /// Set when the ready event fires.
    connected_at: Option<Instant>,
}

impl RuntimeState {
    pub fn new(debug: bool) -> Self {
        Self {
            enabled: false,
            debug,
            started_at: Instant::now(),
            connected_at: None,
        }
    }

    /// Immutable copy handed to event handlers.
    pub fn snapshot(&self) -> RuntimeSnapshot {
        RuntimeSnapshot {
            enabled: self.enabled,
            debug: self.debug,
            started_at: self.started_at,
        }
    }

    /// Mark the bot ready. Returns false if it already was.
    pub fn mark_ready(&mut self) -> bool {
        if self.enabled {
            return false;
        }
        self.enabled = true;
        self.connected_at = Some(Instant::now());
        true
    }

    /// Time since process start.
    pub fn elapsed_since_start(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }
}

/// Point-in-time view of the runtime flags.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeSnapshot {
    pub enabled: bool,
    pub debug: bool,
    pub started_at: Instant,
}

impl RuntimeSnapshot {
    /// Whether inbound messages get reactions and command dispatch.
    pub fn observing(&self) -> bool {
        self.enabled && !self.debug
    }
}

impl TypeMapKey for RuntimeState {
    type Value = Arc<RwLock<RuntimeState>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_disabled() {
        let state = RuntimeState::new(false);
        let snapshot = state.snapshot();
        assert!(!snapshot.enabled);
        assert!(!snapshot.observing());
    }

    #[test]
    fn test_mark_ready_flips_once() {
        let mut state = RuntimeState::new(false);
        assert!(state.mark_ready());
        assert!(state.snapshot().enabled);
        // A second ready (gateway resume) must not count as a transition.
        assert!(!state.mark_ready());
    }

    #[test]
    fn test_debug_mode_blocks_observation() {
        let mut state = RuntimeState::new(true);
        state.mark_ready();

        let snapshot = state.snapshot();
        assert!(snapshot.enabled);
        assert!(snapshot.debug);
        assert!(!snapshot.observing());
    }

    #[test]
    fn test_enabled_without_debug_observes() {
        let mut state = RuntimeState::new(false);
        state.mark_ready();
        assert!(state.snapshot().observing());
    }
}
