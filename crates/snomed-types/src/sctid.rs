//! SNOMED CT identifier types.
//!
//! Attribute and reference set identifiers used as compile-time constants are
//! plain [`SctId`] integers. Identifiers that flow in from the terminology
//! server are kept as opaque strings, exactly as the server returned them,
//! and wrapped in role-specific newtypes so a clinical drug can never be
//! passed where a resolved concept is expected.

use std::fmt;

/// A SNOMED CT identifier (SCTID) known at compile time.
///
/// # Examples
///
/// ```
/// use snomed_types::SctId;
///
/// let has_active_ingredient: SctId = 127489000;
/// ```
pub type SctId = u64;

/// Identifier of a clinical drug, the source concept being mapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ClinicalDrugId(String);

impl ClinicalDrugId {
    /// Wraps a raw identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClinicalDrugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClinicalDrugId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of any concept returned by a terminology query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConceptId(String);

impl ConceptId {
    /// Wraps a raw identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConceptId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
