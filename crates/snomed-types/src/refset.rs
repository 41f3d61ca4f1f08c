//! SNOMED CT reference set membership.
//!
//! The candidate clinical drugs come from the members of a simple reference
//! set. Only the referenced component is of interest here.
//!
//! # Example
//!
//! ```
//! use snomed_types::refset::{RefsetMember, RefsetMemberPage};
//! use snomed_types::ClinicalDrugId;
//!
//! let page = RefsetMemberPage {
//!     items: vec![RefsetMember {
//!         referenced_component_id: ClinicalDrugId::new("12345678"),
//!     }],
//!     total: Some(1),
//! };
//!
//! assert_eq!(page.clinical_drugs().count(), 1);
//! ```

use crate::ClinicalDrugId;

/// A reference set member as returned by the members endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RefsetMember {
    /// The component (a clinical drug concept) that is a member of the refset.
    pub referenced_component_id: ClinicalDrugId,
}

/// One page of reference set members.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefsetMemberPage {
    /// Members in this page.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<RefsetMember>,
    /// Total members in the refset, when the server reports it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub total: Option<u64>,
}

impl RefsetMemberPage {
    /// Iterates over the clinical drugs referenced by this page.
    pub fn clinical_drugs(&self) -> impl Iterator<Item = &ClinicalDrugId> {
        self.items.iter().map(|m| &m.referenced_component_id)
    }
}
