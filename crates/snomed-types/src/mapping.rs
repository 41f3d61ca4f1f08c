//! Mapping outcomes for clinical drugs.
//!
//! A clinical drug is mapped twice, once to its medicinal product form (MPF)
//! and once to its medicinal product (MP). Each attempt yields either a
//! [`MappingRecord`] or an [`UnresolvedReport`] for manual review.

use std::fmt;

use crate::{ClinicalDrugId, ConceptId};

/// The generalization a clinical drug is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    /// Medicinal product form: keeps dose form and ingredient count, drops strength.
    Mpf,
    /// Medicinal product: drops both dose form and strength.
    Mp,
}

impl TargetType {
    /// Both target types in mapping order.
    pub const ALL: [TargetType; 2] = [TargetType::Mpf, TargetType::Mp];

    /// Returns the tag written to mapping files.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Mpf => "MPF",
            Self::Mp => "MP",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which of the two constraint queries produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryTier {
    /// Query on the target type's defining attributes only.
    Simple,
    /// Query narrowed through the clinical drug's substance lineage.
    Escalated,
}

impl fmt::Display for QueryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => f.write_str("Simple"),
            Self::Escalated => f.write_str("Complex"),
        }
    }
}

/// A clinical drug successfully mapped to one generalization.
///
/// # Examples
///
/// ```
/// use snomed_types::{ClinicalDrugId, ConceptId, MappingRecord, TargetType};
///
/// let record = MappingRecord {
///     clinical_drug: ClinicalDrugId::new("111"),
///     concept: ConceptId::new("222"),
///     target: TargetType::Mpf,
/// };
///
/// assert_eq!(record.to_string(), "CD|111|MPF|222");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MappingRecord {
    /// The source clinical drug.
    pub clinical_drug: ClinicalDrugId,
    /// The resolved MPF or MP concept.
    pub concept: ConceptId,
    /// Which generalization `concept` is.
    pub target: TargetType,
}

impl MappingRecord {
    /// Returns the four fields of the pipe-delimited mapping line.
    pub fn fields(&self) -> [&str; 4] {
        [
            "CD",
            self.clinical_drug.as_str(),
            self.target.tag(),
            self.concept.as_str(),
        ]
    }
}

impl fmt::Display for MappingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields().join("|"))
    }
}

/// Why a clinical drug could not be mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnresolvedReason {
    /// No concept matched.
    NoCandidate {
        /// Query that came back empty.
        tier: QueryTier,
    },
    /// More than one concept still matched after escalation.
    Ambiguous {
        /// Reported match count of the escalated query.
        count: u64,
    },
    /// The server reported one match but returned a different number of items.
    InconsistentPage {
        /// Query that produced the page.
        tier: QueryTier,
        /// Reported total.
        total: u64,
        /// Items actually returned.
        returned: usize,
    },
    /// The query could not be delivered or the server answered with an error status.
    Transport {
        /// Query that failed.
        tier: QueryTier,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    Decode {
        /// Query that failed.
        tier: QueryTier,
        /// Error description.
        message: String,
    },
}

impl UnresolvedReason {
    /// Returns the query tier the resolution stopped at.
    pub fn tier(&self) -> QueryTier {
        match self {
            Self::NoCandidate { tier }
            | Self::InconsistentPage { tier, .. }
            | Self::Transport { tier, .. }
            | Self::Decode { tier, .. } => *tier,
            Self::Ambiguous { .. } => QueryTier::Escalated,
        }
    }

    /// Returns the candidate count observed, if a query completed.
    pub fn observed_count(&self) -> Option<u64> {
        match self {
            Self::NoCandidate { .. } => Some(0),
            Self::Ambiguous { count } => Some(*count),
            Self::InconsistentPage { total, .. } => Some(*total),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

/// A clinical drug that needs manual review for one target type.
///
/// # Examples
///
/// ```
/// use snomed_types::{ClinicalDrugId, TargetType, UnresolvedReason, UnresolvedReport};
///
/// let report = UnresolvedReport {
///     clinical_drug: ClinicalDrugId::new("111"),
///     target: TargetType::Mp,
///     reason: UnresolvedReason::Ambiguous { count: 2 },
/// };
///
/// assert_eq!(report.to_string(), "Complex search for MP gave 2 for CD 111");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnresolvedReport {
    /// The clinical drug that could not be mapped.
    pub clinical_drug: ClinicalDrugId,
    /// Target type that failed.
    pub target: TargetType,
    /// What went wrong.
    pub reason: UnresolvedReason,
}

impl UnresolvedReport {
    /// Returns the candidate count observed, if a query completed.
    pub fn observed_count(&self) -> Option<u64> {
        self.reason.observed_count()
    }
}

impl fmt::Display for UnresolvedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tier = self.reason.tier();
        let (target, cd) = (self.target, &self.clinical_drug);
        match &self.reason {
            UnresolvedReason::NoCandidate { .. } => {
                write!(f, "{tier} search for {target} gave 0 for CD {cd}")
            }
            UnresolvedReason::Ambiguous { count } => {
                write!(f, "{tier} search for {target} gave {count} for CD {cd}")
            }
            UnresolvedReason::InconsistentPage { total, returned, .. } => write!(
                f,
                "{tier} search for {target} reported {total} but returned {returned} for CD {cd}"
            ),
            UnresolvedReason::Transport { message, .. } => write!(
                f,
                "{tier} search for {target} failed for CD {cd}: transport error: {message}"
            ),
            UnresolvedReason::Decode { message, .. } => write!(
                f,
                "{tier} search for {target} failed for CD {cd}: decode error: {message}"
            ),
        }
    }
}
