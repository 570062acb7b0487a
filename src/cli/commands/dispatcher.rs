//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::store::FileRepository;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing user-facing output through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
///
/// Every command works against a fresh [`FileRepository`] over the
/// directories resolved from flags and environment; nothing persists
/// across invocations except the files themselves.
pub struct CommandDispatcher {
    repository: FileRepository,
}

impl CommandDispatcher {
    /// Create a dispatcher over the resolved tag directories.
    pub fn new(repository: FileRepository) -> Self {
        Self { repository }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Init(args) => {
                let cmd = super::init::InitCommand::new(self.repository.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Dump(args) => {
                let cmd = super::dump::DumpCommand::new(self.repository.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Update(args) => {
                let cmd = super::update::UpdateCommand::new(self.repository.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Ls(args) => {
                let cmd = super::ls::LsCommand::new(self.repository.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Get(args) => {
                let cmd = super::get::GetCommand::new(self.repository.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Set(args) => {
                let cmd = super::set::SetCommand::new(self.repository.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Rm(args) => {
                let cmd = super::rm::RmCommand::new(self.repository.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Version => {
                let cmd = super::version::VersionCommand::new();
                cmd.execute(ui)
            }
        }
    }
}
