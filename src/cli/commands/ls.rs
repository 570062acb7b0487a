//! Ls command implementation.
//!
//! `systags ls` merges the three tiers, narrows the result with pick/omit,
//! optionally rewrites keys with a prefix/suffix, and prints the mapping
//! in the requested format.

use crate::cli::args::LsArgs;
use crate::error::Result;
use crate::filter::{select, FilterMode};
use crate::store::{tags::rekey, FileRepository, TagStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The ls command implementation.
pub struct LsCommand {
    repository: FileRepository,
    args: LsArgs,
}

impl LsCommand {
    /// Create a new ls command.
    pub fn new(repository: FileRepository, args: LsArgs) -> Self {
        Self { repository, args }
    }
}

impl Command for LsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = TagStore::new();
        self.repository.load(&mut store)?;

        let mode = if self.args.regex {
            FilterMode::Regex
        } else {
            FilterMode::Exact
        };

        let tags = select(&store.merged(), mode, &self.args.pick, &self.args.omit)?;
        let tags = rekey(&tags, &self.args.prefix, &self.args.suffix);

        ui.message(&self.args.format.render(&tags)?);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SystagsError;
    use crate::format::Format;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn repository(temp: &TempDir) -> FileRepository {
        let repo = FileRepository::new(&temp.path().join("config"), &temp.path().join("system"));
        fs::create_dir_all(repo.config_dir()).unwrap();
        fs::create_dir_all(repo.system_dir()).unwrap();
        fs::write(repo.config_dir().join("base.json"), r#"{"env":"prod","team":"ops"}"#).unwrap();
        fs::write(repo.system_dir().join("remote.json"), r#"{"region":"us-east-1","env":"remote"}"#)
            .unwrap();
        fs::write(repo.system_dir().join("system.json"), r#"{"owner":"sre"}"#).unwrap();
        repo
    }

    fn args() -> LsArgs {
        LsArgs {
            regex: false,
            format: Format::Json,
            pick: String::new(),
            omit: String::new(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    #[test]
    fn ls_merges_with_tier_precedence() {
        let temp = TempDir::new().unwrap();
        let cmd = LsCommand::new(repository(&temp), args());

        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();
        let out = ui.stdout();
        // config overrides remote on collision
        assert!(out.contains("\"env\": \"prod\""));
        assert!(out.contains("\"region\": \"us-east-1\""));
        assert!(out.contains("\"owner\": \"sre\""));
    }

    #[test]
    fn ls_pick_and_omit_narrow_output() {
        let temp = TempDir::new().unwrap();
        let cmd = LsCommand::new(
            repository(&temp),
            LsArgs {
                pick: "env,team".into(),
                omit: "team".into(),
                ..args()
            },
        );

        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();
        assert_eq!(ui.stdout(), "{\n  \"env\": \"prod\"\n}");
    }

    #[test]
    fn ls_applies_prefix_and_suffix() {
        let temp = TempDir::new().unwrap();
        let cmd = LsCommand::new(
            repository(&temp),
            LsArgs {
                pick: "env".into(),
                prefix: "tag_".into(),
                suffix: "_v1".into(),
                ..args()
            },
        );

        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();
        assert!(ui.stdout().contains("\"tag_env_v1\": \"prod\""));
    }

    #[test]
    fn ls_env_format_renders_exports() {
        let temp = TempDir::new().unwrap();
        let cmd = LsCommand::new(
            repository(&temp),
            LsArgs {
                pick: "env".into(),
                format: Format::Env,
                ..args()
            },
        );

        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();
        assert_eq!(ui.stdout(), "export ENV='prod'");
    }

    #[test]
    fn ls_invalid_regex_fails_before_output() {
        let temp = TempDir::new().unwrap();
        let cmd = LsCommand::new(
            repository(&temp),
            LsArgs {
                regex: true,
                pick: "(unclosed".into(),
                ..args()
            },
        );

        let mut ui = MockUI::new();
        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, SystagsError::Filter { .. }));
        assert!(ui.stdout().is_empty());
    }
}
