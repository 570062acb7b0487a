//! AWS instance-metadata tag source.
//!
//! Uses IMDSv2: a session token is requested first, then the instance tag
//! listing under `meta-data/tags/instance` yields one key per line, and
//! each key resolves to its value with a follow-up request.
//!
//! Instance tags must be enabled on the instance for this mechanism to
//! work; a 404 on the listing path, or an unreachable metadata endpoint,
//! reports [`FetchOutcome::Unsupported`] so a different strategy (or a
//! clean error) can take over.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::{Result, SystagsError};
use crate::store::Tags;

use super::{FetchOutcome, RemoteSource};

/// Link-local metadata endpoint available inside EC2 instances.
const DEFAULT_ENDPOINT: &str = "http://169.254.169.254";

/// Session token lifetime requested from IMDS.
const TOKEN_TTL_SECONDS: &str = "21600";

const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";
const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";

/// Fetches instance tags from the EC2 instance-metadata service.
pub struct AwsImdsSource {
    endpoint: String,
}

impl AwsImdsSource {
    /// Create a source against the standard link-local endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a source against a custom endpoint, mainly for tests.
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Request an IMDSv2 session token. An unreachable endpoint means the
    /// host is not served by this mechanism at all.
    fn session_token(&self, client: &Client) -> Result<Option<String>> {
        let response = match client
            .put(format!("{}/latest/api/token", self.endpoint))
            .header(TOKEN_TTL_HEADER, TOKEN_TTL_SECONDS)
            .send()
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() || e.is_connect() => {
                tracing::debug!("metadata endpoint unreachable: {e}");
                return Ok(None);
            }
            Err(e) => return Err(self.fetch_error(e)),
        };

        if !response.status().is_success() {
            return Err(self.status_error("token request", response.status()));
        }

        let token = response.text().map_err(|e| self.fetch_error(e))?;
        Ok(Some(token))
    }

    /// Read one metadata path as text. `None` means the path does not
    /// exist (404).
    fn metadata(&self, client: &Client, token: &str, path: &str) -> Result<Option<String>> {
        let response = client
            .get(format!("{}/latest/meta-data/{path}", self.endpoint))
            .header(TOKEN_HEADER, token)
            .send()
            .map_err(|e| self.fetch_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(self.status_error(path, response.status()));
        }

        let body = response.text().map_err(|e| self.fetch_error(e))?;
        Ok(Some(body))
    }

    fn fetch_error(&self, source: impl std::fmt::Display) -> SystagsError {
        SystagsError::RemoteFetch {
            message: source.to_string(),
        }
    }

    fn status_error(&self, what: &str, status: StatusCode) -> SystagsError {
        SystagsError::RemoteFetch {
            message: format!("{what} returned HTTP {status}"),
        }
    }
}

impl Default for AwsImdsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSource for AwsImdsSource {
    fn name(&self) -> &str {
        "aws-imds"
    }

    fn fetch(&self, timeout: Duration) -> Result<FetchOutcome> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| self.fetch_error(e))?;

        let Some(token) = self.session_token(&client)? else {
            return Ok(FetchOutcome::Unsupported);
        };

        // The tag listing is only present when instance tags are enabled
        // in instance metadata options.
        let Some(listing) = self.metadata(&client, &token, "tags/instance")? else {
            tracing::debug!("instance tags are not exposed through metadata");
            return Ok(FetchOutcome::Unsupported);
        };

        let mut tags = Tags::new();
        for key in listing.lines().filter(|key| !key.is_empty()) {
            let value = self
                .metadata(&client, &token, &format!("tags/instance/{key}"))?
                .unwrap_or_default();
            tags.insert(key.to_string(), value);
        }

        tracing::debug!("fetched {} tags from instance metadata", tags.len());
        Ok(FetchOutcome::Tags(tags))
    }
}
