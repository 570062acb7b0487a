//! Command-line interface.
//!
//! [`args`] defines the clap surface; [`commands`] holds one implementation
//! per subcommand plus the dispatcher that routes to them.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::dispatcher::{Command, CommandDispatcher, CommandResult};
