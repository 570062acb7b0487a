//! Version command implementation.

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The version command implementation.
#[derive(Default)]
pub struct VersionCommand;

impl VersionCommand {
    /// Create a new version command.
    pub fn new() -> Self {
        Self
    }
}

impl Command for VersionCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.message(concat!("systags ", env!("CARGO_PKG_VERSION")));
        Ok(CommandResult::success())
    }
}
