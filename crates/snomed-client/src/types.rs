//! Client-specific types: errors and connection settings.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the terminology server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be built, sent, or its body read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The response body did not have the expected shape.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Returns true for failures decoding an otherwise successful response.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Default Snowstorm instance (Norwegian national terminology server).
pub const DEFAULT_BASE_URL: &str = "https://snowstorm.terminologi.ehelse.no/snowstorm/snomed-ct/";

/// Default branch holding the Norwegian extension and its reference sets.
pub const DEFAULT_BRANCH: &str = "MAIN/SNOMEDCT-NO/REFSETS";

/// Connection settings for a Snowstorm server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL up to and including `snomed-ct/`.
    pub base_url: String,
    /// Branch path queried, e.g. `MAIN/SNOMEDCT-NO/REFSETS`.
    pub branch: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Returns the URL of an endpoint on the configured branch.
    pub fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.branch.trim_matches('/'),
            resource
        )
    }
}
