//! # snomed-mapper
//!
//! Maps SNOMED CT clinical drugs to their medicinal product form (MPF) and
//! medicinal product (MP).
//!
//! Each clinical drug is resolved twice through a [`ConceptResolver`]: a
//! query on the target type's defining attributes, escalated to a query
//! narrowed by the drug's base substances when the first one is ambiguous.
//! Anything that does not converge on exactly one concept is written out
//! for manual review.

#![warn(missing_docs)]

mod config;
mod error;
pub mod expressions;
mod orchestrator;
mod resolver;
pub mod sink;

#[cfg(test)]
mod testing;

pub use config::MapperConfig;
pub use error::{MapperError, MapperResult};
pub use orchestrator::{MappingOutcome, MappingRun, RunSummary};
pub use resolver::{ConceptResolver, Resolution, DEFAULT_QUERY_LIMIT};
pub use sink::{FileSink, MappingSink};
