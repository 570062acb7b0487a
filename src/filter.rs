//! Pick/omit key selection over a tag mapping.
//!
//! Selection runs in two passes: `pick` narrows the mapping first, then
//! `omit` removes keys from what survived. Both patterns compile before any
//! selection happens, so an invalid pattern fails the whole operation up
//! front.

use regex::Regex;

use crate::error::{Result, SystagsError};
use crate::store::Tags;

/// How `pick` and `omit` are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Comma-separated literal key lists, matched by full-key equality.
    Exact,
    /// Raw, unanchored regular expressions.
    Regex,
}

/// Select a subset of `tags` by key.
///
/// An empty `pick` selects every key; an empty `omit` excludes nothing. In
/// [`FilterMode::Exact`], each comma-separated literal is escaped for regex
/// metacharacters, joined with alternation, and anchored so only full-key
/// equality matches.
pub fn select(tags: &Tags, mode: FilterMode, pick: &str, omit: &str) -> Result<Tags> {
    let pick = compile(mode, pick)?;
    let omit = compile(mode, omit)?;

    let picked = tags
        .iter()
        .filter(|(key, _)| match &pick {
            Some(re) => re.is_match(key),
            None => true,
        })
        .filter(|(key, _)| match &omit {
            Some(re) => !re.is_match(key),
            None => true,
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(picked)
}

/// Compile one pattern according to the filter mode. Empty patterns compile
/// to `None`, meaning "no constraint".
fn compile(mode: FilterMode, pattern: &str) -> Result<Option<Regex>> {
    if pattern.is_empty() {
        return Ok(None);
    }

    let pattern = match mode {
        FilterMode::Regex => pattern.to_string(),
        FilterMode::Exact => {
            let alternates: Vec<String> =
                pattern.split(',').map(|key| regex::escape(key)).collect();
            format!("^({})$", alternates.join("|"))
        }
    };

    Regex::new(&pattern)
        .map(Some)
        .map_err(|e| SystagsError::Filter {
            message: e.to_string(),
        })
}
