//! # snomed-types
//!
//! Type definitions for mapping SNOMED CT clinical drugs to their medicinal
//! product form (MPF) and medicinal product (MP) generalizations.
//!
//! This crate provides the identifiers, query results, mapping outcomes and
//! the ECL builder shared by the client and mapper crates.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   The terminology client requires it to decode server responses.
//!
//! ## Usage
//!
//! ```rust
//! use snomed_types::{ClinicalDrugId, ConceptId, MappingRecord, TargetType};
//! use snomed_types::well_known;
//!
//! let record = MappingRecord {
//!     clinical_drug: ClinicalDrugId::new("1234"),
//!     concept: ConceptId::new("5678"),
//!     target: TargetType::Mpf,
//! };
//!
//! assert_eq!(record.to_string(), "CD|1234|MPF|5678");
//! assert_eq!(well_known::HAS_ACTIVE_INGREDIENT, 127489000);
//! ```

#![warn(missing_docs)]

mod concept;
pub mod ecl;
mod mapping;
pub mod refset;
mod sctid;
pub mod well_known;

// Re-export all public types at crate root
pub use concept::{ConceptItem, ConceptPage, PageVerdict};
pub use ecl::{Attribute, AttributeValue, Cardinality, EclExpression};
pub use mapping::{MappingRecord, QueryTier, TargetType, UnresolvedReason, UnresolvedReport};
pub use refset::{RefsetMember, RefsetMemberPage};
pub use sctid::{ClinicalDrugId, ConceptId, SctId};
