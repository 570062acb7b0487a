//! Tier persistence on disk.
//!
//! A [`FileRepository`] reads tag tiers from two locations:
//!
//! - the *config directory*, holding any number of `*.json` fragments, each
//!   a flat string-to-string object, merged later-wins;
//! - the *system directory*, holding `remote.json` and `system.json`, the
//!   persisted remote and system tiers.
//!
//! Saving backs each existing target file up to a `.bak` sibling before
//! overwriting it. The backup is single-generation: each save replaces any
//! prior `.bak` unconditionally.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SystagsError};

use super::{TagStore, Tags};

/// File name of the persisted remote tier inside the system directory.
pub const REMOTE_FILE: &str = "remote.json";

/// File name of the persisted system tier inside the system directory.
pub const SYSTEM_FILE: &str = "system.json";

/// Loads tag tiers from disk and persists the mutable ones back.
#[derive(Debug, Clone)]
pub struct FileRepository {
    config_dir: PathBuf,
    system_dir: PathBuf,
}

impl FileRepository {
    /// Create a repository over the given config and system directories.
    pub fn new(config_dir: &Path, system_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            system_dir: system_dir.to_path_buf(),
        }
    }

    /// The config directory this repository reads fragments from.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// The system directory this repository persists tiers into.
    pub fn system_dir(&self) -> &Path {
        &self.system_dir
    }

    /// Load all three tiers into the store.
    ///
    /// The store is only updated once every tier has been read and parsed,
    /// so a failed load leaves no partial merge behind; the caller should
    /// treat the store as invalidated and not use it after an error.
    pub fn load(&self, store: &mut TagStore) -> Result<()> {
        let config = self.load_config_fragments()?;
        let remote = self.load_tier_file(REMOTE_FILE)?;
        let system = self.load_tier_file(SYSTEM_FILE)?;

        store.replace_all(config, remote, system);
        Ok(())
    }

    /// Persist the store's remote and system tiers.
    ///
    /// The config tier is filesystem-sourced truth and is never written.
    /// For each target file that already exists, its current bytes are
    /// first copied to a `.bak` sibling. Order: back up remote, back up
    /// system, write remote, write system. A failure partway can leave the
    /// originals and backups out of step; this window is bounded but not
    /// eliminated, and there is no cross-process locking.
    pub fn save(&self, store: &TagStore) -> Result<()> {
        fs::create_dir_all(&self.system_dir)?;

        let remote_file = self.system_dir.join(REMOTE_FILE);
        let system_file = self.system_dir.join(SYSTEM_FILE);

        // Serialize both tiers up front so an encoding failure aborts
        // before any file is touched.
        let remote_json = to_tab_indented_json(store.remote_tags())?;
        let system_json = to_tab_indented_json(store.system_tags())?;

        back_up(&remote_file)?;
        back_up(&system_file)?;

        tracing::debug!("writing remote file: {}", remote_file.display());
        fs::write(&remote_file, remote_json)?;

        tracing::debug!("writing system file: {}", system_file.display());
        fs::write(&system_file, system_json)?;

        Ok(())
    }

    /// Read every `*.json` fragment directly inside the config directory
    /// and merge them by key, later fragment winning on collision.
    ///
    /// Fragments are processed in directory-listing order, which is
    /// filesystem-dependent; precedence among fragments that define the
    /// same key is therefore unspecified. Subdirectories and non-JSON
    /// files are skipped. An absent directory yields an empty tier.
    fn load_config_fragments(&self) -> Result<Tags> {
        let mut merged = Tags::new();

        let entries = match fs::read_dir(&self.config_dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(merged),
        };

        tracing::debug!("reading config directory: {}", self.config_dir.display());

        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type()?.is_dir() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            tracing::debug!("reading config fragment: {}", path.display());
            let fragment = parse_tag_file(&path)?;
            merged.extend(fragment);
        }

        Ok(merged)
    }

    /// Read one tier file from the system directory. A missing file yields
    /// an empty tier; a present-but-malformed file is a parse error.
    fn load_tier_file(&self, name: &str) -> Result<Tags> {
        let path = self.system_dir.join(name);
        if !path.exists() {
            return Ok(Tags::new());
        }

        tracing::debug!("reading tier file: {}", path.display());
        parse_tag_file(&path)
    }
}

/// Parse a file as a flat string-to-string JSON object.
fn parse_tag_file(path: &Path) -> Result<Tags> {
    let content = fs::read_to_string(path)?;

    serde_json::from_str(&content).map_err(|e| SystagsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Copy a file's current bytes to its `.bak` sibling, replacing any prior
/// backup. A missing original is not an error; there is nothing to keep.
fn back_up(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);

    tracing::debug!("writing backup: {}", backup.display());
    fs::copy(path, &backup)?;
    Ok(())
}

/// Serialize a tag mapping as a tab-indented JSON object, the on-disk
/// format of the system directory files.
fn to_tab_indented_json(tags: &Tags) -> Result<String> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);

    tags.serialize(&mut serializer)
        .map_err(|e| SystagsError::Format {
            format: "json".into(),
            message: e.to_string(),
        })?;

    String::from_utf8(out).map_err(|e| SystagsError::Format {
        format: "json".into(),
        message: e.to_string(),
    })
}
