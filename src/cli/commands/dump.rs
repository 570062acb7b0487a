//! Dump command implementation.
//!
//! `systags dump -k <tier>` prints one tier as indented JSON, without any
//! merging or filtering.

use crate::cli::args::{DumpArgs, TierKind};
use crate::error::Result;
use crate::format::Format;
use crate::store::{FileRepository, TagStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The dump command implementation.
pub struct DumpCommand {
    repository: FileRepository,
    args: DumpArgs,
}

impl DumpCommand {
    /// Create a new dump command.
    pub fn new(repository: FileRepository, args: DumpArgs) -> Self {
        Self { repository, args }
    }
}

impl Command for DumpCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = TagStore::new();
        self.repository.load(&mut store)?;

        let tags = match self.args.kind {
            TierKind::Config => store.config_tags(),
            TierKind::Remote => store.remote_tags(),
            TierKind::System => store.system_tags(),
        };

        ui.message(&Format::Json.render(tags)?);
        Ok(CommandResult::success())
    }
}
