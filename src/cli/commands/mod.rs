//! Subcommand implementations.

pub mod dispatcher;
pub mod dump;
pub mod get;
pub mod init;
pub mod ls;
pub mod rm;
pub mod set;
pub mod update;
pub mod version;
