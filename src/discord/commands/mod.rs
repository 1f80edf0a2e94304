//! Command implementations.

pub mod misc;
pub mod role;
