//! # snomed-client
//!
//! HTTP client for Snowstorm SNOMED CT terminology servers.
//!
//! Provides ECL concept queries through the [`ConceptQuery`] trait and
//! retrieval of reference set members as clinical drug candidates.

#![warn(missing_docs)]

mod client;
mod types;

pub use client::{ConceptQuery, SnowstormClient};
pub use types::{ClientConfig, ClientError, ClientResult, DEFAULT_BASE_URL, DEFAULT_BRANCH};

// Re-export snomed-types for convenience
pub use snomed_types;
