//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command borrows the shared
//! [`CommandContext`] (settings, local cache, remote source), so tests can
//! swap in a temporary cache and an offline remote.

pub mod add;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod list;
pub mod scaffold;
pub mod search;
pub mod sync;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult, EXIT_USAGE};
