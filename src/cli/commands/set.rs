//! Set command implementation.
//!
//! `systags set -k <key> -v <value>` writes a tag into the system tier and
//! persists it. Config and remote tiers are never touched.

use crate::cli::args::SetArgs;
use crate::error::Result;
use crate::store::{FileRepository, TagStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The set command implementation.
pub struct SetCommand {
    repository: FileRepository,
    args: SetArgs,
}

impl SetCommand {
    /// Create a new set command.
    pub fn new(repository: FileRepository, args: SetArgs) -> Self {
        Self { repository, args }
    }
}

impl Command for SetCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = TagStore::new();
        self.repository.load(&mut store)?;

        let previous = store.set(&self.args.key, &self.args.value);
        tracing::debug!(
            "set {}={} (was: {:?})",
            self.args.key,
            self.args.value,
            previous
        );

        self.repository.save(&store)?;
        Ok(CommandResult::success())
    }
}
