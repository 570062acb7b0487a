//! Init command implementation.
//!
//! `systags init` creates the persisted tier files (and the system
//! directory itself) if they do not exist yet, normalizing whatever is
//! already there. With `--reset` every tier is cleared first, so the
//! written files are empty objects.

use crate::cli::args::InitArgs;
use crate::error::Result;
use crate::store::{FileRepository, TagStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    repository: FileRepository,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(repository: FileRepository, args: InitArgs) -> Self {
        Self { repository, args }
    }
}

impl Command for InitCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = TagStore::new();
        self.repository.load(&mut store)?;

        if self.args.reset {
            store.reset();
        }

        self.repository.save(&store)?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn repository(temp: &TempDir) -> FileRepository {
        FileRepository::new(&temp.path().join("config"), &temp.path().join("system"))
    }

    #[test]
    fn init_creates_tier_files() {
        let temp = TempDir::new().unwrap();
        let repo = repository(&temp);
        let cmd = InitCommand::new(repo.clone(), InitArgs::default());

        let result = cmd.execute(&mut MockUI::new()).unwrap();
        assert!(result.success);
        assert!(repo.system_dir().join("remote.json").exists());
        assert!(repo.system_dir().join("system.json").exists());
    }

    #[test]
    fn init_preserves_existing_tags() {
        let temp = TempDir::new().unwrap();
        let repo = repository(&temp);
        fs::create_dir_all(repo.system_dir()).unwrap();
        fs::write(repo.system_dir().join("system.json"), r#"{"owner":"ops"}"#).unwrap();

        let cmd = InitCommand::new(repo.clone(), InitArgs::default());
        cmd.execute(&mut MockUI::new()).unwrap();

        let content = fs::read_to_string(repo.system_dir().join("system.json")).unwrap();
        assert!(content.contains("\"owner\": \"ops\""));
    }

    #[test]
    fn init_reset_clears_tiers() {
        let temp = TempDir::new().unwrap();
        let repo = repository(&temp);
        fs::create_dir_all(repo.system_dir()).unwrap();
        fs::write(repo.system_dir().join("system.json"), r#"{"owner":"ops"}"#).unwrap();

        let cmd = InitCommand::new(repo.clone(), InitArgs { reset: true });
        cmd.execute(&mut MockUI::new()).unwrap();

        let content = fs::read_to_string(repo.system_dir().join("system.json")).unwrap();
        assert_eq!(content, "{}");
    }
}
