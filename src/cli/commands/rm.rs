//! Rm command implementation.
//!
//! `systags rm -k <key>` removes a tag from the system tier and persists
//! the result. Removing a key that was never set is not an error.

use crate::cli::args::RmArgs;
use crate::error::Result;
use crate::store::{FileRepository, TagStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The rm command implementation.
pub struct RmCommand {
    repository: FileRepository,
    args: RmArgs,
}

impl RmCommand {
    /// Create a new rm command.
    pub fn new(repository: FileRepository, args: RmArgs) -> Self {
        Self { repository, args }
    }
}

impl Command for RmCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = TagStore::new();
        self.repository.load(&mut store)?;

        let previous = store.remove(&self.args.key);
        tracing::debug!("removed {} (was: {:?})", self.args.key, previous);

        self.repository.save(&store)?;
        Ok(CommandResult::success())
    }
}
