//! systags - Machine tag resolution and persistence.
//!
//! systags maintains a machine's tags (string key/value metadata) drawn from
//! three tiers: static config fragments, a locally mutable override store,
//! and metadata fetched from the cloud provider hosting the machine. The
//! tiers resolve into a single namespace queryable by key, filterable by
//! pattern, and exportable in several formats consumed by other operational
//! tooling (shell environments, service managers, monitoring agents).
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`filter`] - Pick/omit key selection, exact or regex
//! - [`format`] - Tag serialization formats
//! - [`remote`] - Cloud-provider tag fetching with bounded retry
//! - [`store`] - The three-tier tag store and file repository
//! - [`ui`] - Terminal output abstraction
//!
//! # Example
//!
//! ```
//! use systags::store::TagStore;
//!
//! let mut store = TagStore::new();
//! store.set("region", "us-east-1");
//! assert_eq!(store.get("region", ""), "us-east-1");
//! assert_eq!(store.get("missing", "fallback"), "fallback");
//! ```

pub mod cli;
pub mod error;
pub mod filter;
pub mod format;
pub mod remote;
pub mod store;
pub mod ui;

pub use error::{Result, SystagsError};
