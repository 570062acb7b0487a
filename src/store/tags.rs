//! The in-memory tag store.
//!
//! A [`TagStore`] holds three tag tiers of differing trust and volatility:
//!
//! - *config*: read from filesystem fragments; never mutated in memory and
//!   never written back — it is re-derived from disk on every load.
//! - *system*: the mutable local override tier; the only tier touched by
//!   set/remove operations.
//! - *remote*: replaced wholesale on each successful refresh from the cloud
//!   provider; never merged incrementally.
//!
//! Lookup precedence is system > config > remote; the merged listing applies
//! the same precedence by merging remote first and system last.

use std::collections::BTreeMap;

/// A flat tag mapping. `BTreeMap` keeps iteration sorted by key, so every
/// serialized representation of a tag mapping is deterministic.
pub type Tags = BTreeMap<String, String>;

/// Holds the three tag tiers for a single command invocation.
///
/// A store starts empty; [`FileRepository::load`](super::FileRepository::load)
/// populates all three tiers together, discarding whatever was in memory.
#[derive(Debug, Default)]
pub struct TagStore {
    config: Tags,
    remote: Tags,
    system: Tags,
}

impl TagStore {
    /// Create a store with all three tiers empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all three tiers at once. Used by load, which either updates
    /// every tier together or fails without touching the store.
    pub fn replace_all(&mut self, config: Tags, remote: Tags, system: Tags) {
        self.config = config;
        self.remote = remote;
        self.system = system;
    }

    /// Clear every tier back to empty.
    pub fn reset(&mut self) {
        self.config.clear();
        self.remote.clear();
        self.system.clear();
    }

    /// Replace the remote tier wholesale with a fresh fetch result.
    pub fn replace_remote(&mut self, tags: Tags) {
        self.remote = tags;
    }

    /// The config tier.
    pub fn config_tags(&self) -> &Tags {
        &self.config
    }

    /// The remote tier.
    pub fn remote_tags(&self) -> &Tags {
        &self.remote
    }

    /// The system tier.
    pub fn system_tags(&self) -> &Tags {
        &self.system
    }

    /// Look up a single key: system, then config, then remote, then the
    /// caller-supplied default. The first tier containing the key wins.
    pub fn get(&self, key: &str, default: &str) -> String {
        self.system
            .get(key)
            .or_else(|| self.config.get(key))
            .or_else(|| self.remote.get(key))
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Set a tag in the system tier. Returns the previous value, or an
    /// empty string if the tag did not exist.
    pub fn set(&mut self, key: &str, value: &str) -> String {
        self.system
            .insert(key.to_string(), value.to_string())
            .unwrap_or_default()
    }

    /// Remove a tag from the system tier. Returns the previous value, or
    /// an empty string if the tag did not exist. Removing a nonexistent
    /// key is not an error.
    pub fn remove(&mut self, key: &str) -> String {
        self.system.remove(key).unwrap_or_default()
    }

    /// The combined view of all three tiers. Merged remote-first, then
    /// config, then system, so later tiers override earlier ones on key
    /// collision — consistent with [`get`](Self::get).
    pub fn merged(&self) -> Tags {
        let mut combined = self.remote.clone();
        combined.extend(self.config.clone());
        combined.extend(self.system.clone());
        combined
    }
}

/// Return a new mapping with every key prefixed and/or suffixed. Empty
/// prefix and suffix is an identity; the input is not mutated.
pub fn rekey(tags: &Tags, prefix: &str, suffix: &str) -> Tags {
    if prefix.is_empty() && suffix.is_empty() {
        return tags.clone();
    }

    tags.iter()
        .map(|(key, value)| (format!("{prefix}{key}{suffix}"), value.clone()))
        .collect()
}
