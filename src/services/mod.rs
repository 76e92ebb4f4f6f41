//! External Services
//!
//! This module contains services that interact with external systems:
//! - runner: executes model commands (HTTP fetches, debounce timers)

pub mod runner;

// Re-export commonly used types for convenience
pub use runner::{spawn_command_runner, CommandRunner};
