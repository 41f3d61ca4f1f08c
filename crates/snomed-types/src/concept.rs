//! Concept query results.
//!
//! This module provides [`ConceptPage`], the result of a constraint query
//! against the terminology server, and the [`PageVerdict`] the resolver
//! derives from it.

use crate::ConceptId;

/// A single concept as returned by a concept query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConceptItem {
    /// Identifier of the matching concept.
    pub concept_id: ConceptId,
}

/// One page of concepts matching a constraint expression.
///
/// `total` is the server's authoritative match count and may exceed
/// `items.len()` when the request limit truncated the page.
///
/// # Examples
///
/// ```
/// use snomed_types::{ConceptItem, ConceptPage, ConceptId, PageVerdict};
///
/// let page = ConceptPage {
///     items: vec![ConceptItem { concept_id: ConceptId::new("100") }],
///     total: 1,
/// };
///
/// assert_eq!(page.verdict(), PageVerdict::Unique(ConceptId::new("100")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConceptPage {
    /// Concepts returned in this page.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ConceptItem>,
    /// Total number of matches reported by the server.
    pub total: u64,
}

/// Classification of a concept page for the "exactly one" decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageVerdict {
    /// Exactly one concept matched and it was returned.
    Unique(ConceptId),
    /// Nothing matched.
    Empty,
    /// More than one concept matched; carries the reported total.
    Ambiguous(u64),
    /// The server reported a single match but returned a different number of items.
    Inconsistent {
        /// Reported total.
        total: u64,
        /// Items actually present in the page.
        returned: usize,
    },
}

impl ConceptPage {
    /// Creates a page whose total equals the number of items given.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<ConceptItem> = ids
            .into_iter()
            .map(|id| ConceptItem {
                concept_id: ConceptId::new(id),
            })
            .collect();
        let total = items.len() as u64;
        Self { items, total }
    }

    /// Returns true if the server reported more matches than it returned.
    pub fn is_truncated(&self) -> bool {
        self.total > self.items.len() as u64
    }

    /// Decides the page using the reported total, not the returned item count.
    ///
    /// A total of one is only trusted when exactly one item came back.
    pub fn verdict(&self) -> PageVerdict {
        match self.total {
            0 => PageVerdict::Empty,
            1 => match self.items.as_slice() {
                [only] => PageVerdict::Unique(only.concept_id.clone()),
                items => PageVerdict::Inconsistent {
                    total: self.total,
                    returned: items.len(),
                },
            },
            n => PageVerdict::Ambiguous(n),
        }
    }
}
