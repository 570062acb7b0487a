//! Cloud-provider tag fetching.
//!
//! The refresh protocol only depends on the [`RemoteSource`] capability:
//! fetch the current host's tags within a timeout, signalling "unsupported"
//! when the mechanism does not apply to this host. Provider detection picks
//! one source per run; [`Refresher`] wraps it with the bounded retry loop.

pub mod aws;
pub mod refresher;

use std::time::Duration;

use crate::error::Result;
use crate::store::Tags;

pub use aws::AwsImdsSource;
pub use refresher::Refresher;

/// Outcome of a single remote fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The provider returned a (possibly empty) tag mapping.
    Tags(Tags),
    /// This mechanism cannot serve tags for the current host.
    Unsupported,
}

/// A provider-specific way of fetching the current host's tags.
pub trait RemoteSource {
    /// Human-readable source name for logs and error messages.
    fn name(&self) -> &str;

    /// Fetch tags for the current host, bounded by `timeout`.
    fn fetch(&self, timeout: Duration) -> Result<FetchOutcome>;
}

/// Choose the remote source for this run.
///
/// One provider-detection strategy per run; AWS instance metadata is the
/// only provider wired up today, so detection is trivial. Additional
/// providers slot in here without touching the refresh protocol.
pub fn detect_source() -> Box<dyn RemoteSource> {
    Box::new(AwsImdsSource::new())
}
