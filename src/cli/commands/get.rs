//! Get command implementation.
//!
//! `systags get -k <key>` resolves a single key through the tier
//! precedence (system, config, remote) and prints the value, falling back
//! to `--default` when the key is in no tier.

use crate::cli::args::GetArgs;
use crate::error::Result;
use crate::store::{FileRepository, TagStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The get command implementation.
pub struct GetCommand {
    repository: FileRepository,
    args: GetArgs,
}

impl GetCommand {
    /// Create a new get command.
    pub fn new(repository: FileRepository, args: GetArgs) -> Self {
        Self { repository, args }
    }
}

impl Command for GetCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = TagStore::new();
        self.repository.load(&mut store)?;

        ui.message(&store.get(&self.args.key, &self.args.default));
        Ok(CommandResult::success())
    }
}
