//! Update command implementation.
//!
//! `systags update` replaces the remote tier with a fresh fetch from the
//! detected cloud provider and persists the result. Save only runs after a
//! successful refresh, so a failed fetch leaves the on-disk remote tier
//! untouched.

use crate::cli::args::UpdateArgs;
use crate::error::Result;
use crate::remote::{detect_source, Refresher};
use crate::store::{FileRepository, TagStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The update command implementation.
pub struct UpdateCommand {
    repository: FileRepository,
    args: UpdateArgs,
    refresher: Refresher,
}

impl UpdateCommand {
    /// Create an update command against the detected provider.
    pub fn new(repository: FileRepository, args: UpdateArgs) -> Self {
        Self::with_refresher(repository, args, Refresher::new(detect_source()))
    }

    /// Create an update command with an explicit refresher, for tests.
    pub fn with_refresher(
        repository: FileRepository,
        args: UpdateArgs,
        refresher: Refresher,
    ) -> Self {
        Self {
            repository,
            args,
            refresher,
        }
    }
}

impl Command for UpdateCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = TagStore::new();
        self.repository.load(&mut store)?;

        let tags = self.refresher.update(self.args.timeout, self.args.retry)?;
        store.replace_remote(tags);

        self.repository.save(&store)?;
        Ok(CommandResult::success())
    }
}
