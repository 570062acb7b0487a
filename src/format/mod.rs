//! Tag serialization formats.
//!
//! Every formatter is a pure function from a tag mapping to a string.
//! [`Tags`] iterates sorted by key, so each format's output is
//! deterministic and reproducible.
//!
//! The shell-oriented formats (`env`, `cmd`, `systemd`) normalize keys to
//! the `[A-Z0-9_]` alphabet and single-quote values. Two distinct keys can
//! normalize to the same name; the collision resolves by sorted key order,
//! last writer winning.

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{Result, SystagsError};
use crate::store::Tags;

/// The registry of supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Indented JSON object.
    Json,
    /// YAML mapping.
    #[value(alias = "yml")]
    Yaml,
    /// TOML table.
    Toml,
    /// `export KEY='value'` lines for shell sourcing.
    Env,
    /// `KEY='value'` pairs on one line for command prefixes.
    Cmd,
    /// `sudo systemctl set-environment KEY='value'` lines.
    Systemd,
    /// Telegraf config with tags under `[global_tags]`.
    Telegraf,
    /// Consul config with tags under `"node_meta"`.
    Consul,
}

/// Telegraf nests all host tags under a single table.
#[derive(Serialize)]
struct TelegrafDoc<'a> {
    global_tags: &'a Tags,
}

/// Consul reads node metadata from a dedicated object.
#[derive(Serialize)]
struct ConsulDoc<'a> {
    node_meta: &'a Tags,
}

impl Format {
    /// Render the tag mapping in this format.
    pub fn render(&self, tags: &Tags) -> Result<String> {
        match self {
            Format::Json => serde_json::to_string_pretty(tags).map_err(|e| self.error(e)),
            Format::Yaml => serde_yaml::to_string(tags).map_err(|e| self.error(e)),
            Format::Toml => toml::to_string(tags).map_err(|e| self.error(e)),
            Format::Env => Ok(render_quoted(tags, |key, value| {
                format!("export {key}='{value}'")
            })
            .join("\n")),
            Format::Cmd => Ok(render_quoted(tags, |key, value| format!("{key}='{value}'")).join(" ")),
            Format::Systemd => Ok(render_quoted(tags, |key, value| {
                format!("sudo systemctl set-environment {key}='{value}'")
            })
            .join("\n")),
            Format::Telegraf => {
                toml::to_string_pretty(&TelegrafDoc { global_tags: tags }).map_err(|e| self.error(e))
            }
            Format::Consul => {
                serde_json::to_string_pretty(&ConsulDoc { node_meta: tags }).map_err(|e| self.error(e))
            }
        }
    }

    fn error(&self, source: impl std::fmt::Display) -> SystagsError {
        SystagsError::Format {
            format: format!("{self:?}").to_lowercase(),
            message: source.to_string(),
        }
    }
}

/// Normalize keys and quote values for the shell-oriented formats, then
/// render each surviving pair with `line`. Pairs come back in sorted
/// normalized-key order.
fn render_quoted(tags: &Tags, line: impl Fn(&str, &str) -> String) -> Vec<String> {
    let mut normalized = Tags::new();

    for (key, value) in tags {
        let Some(key) = normalize_key(key) else {
            continue;
        };

        // Single quotes terminate the quoted span, escape, and reopen it.
        let value = value.replace('\'', r"'\''");
        normalized.insert(key, value);
    }

    normalized
        .iter()
        .map(|(key, value)| line(key, value))
        .collect()
}

/// Map a tag key onto the `[A-Z0-9_]` shell-safe alphabet. Returns `None`
/// for keys that are empty or would start with a digit.
fn normalize_key(key: &str) -> Option<String> {
    let normalized: String = key
        .chars()
        .map(|c| {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    match normalized.chars().next() {
        None => None,
        Some(first) if first.is_ascii_digit() => None,
        Some(_) => Some(normalized),
    }
}
