//! Concept resolution with escalation.
//!
//! For one clinical drug and one target type the resolver first asks for the
//! ancestors carrying the target's defining attributes. A single match wins.
//! Several matches escalate to a second query restricted to the clinical
//! drug's base substances, which must then yield exactly one match. Every
//! other outcome, including transport and decode failures, is reported as
//! unresolved and never retried.

use snomed_client::{ClientError, ConceptQuery};
use snomed_types::{
    ClinicalDrugId, ConceptId, EclExpression, PageVerdict, QueryTier, TargetType, UnresolvedReason,
    UnresolvedReport,
};

use crate::expressions::{escalated_expression, simple_expression};

/// Default page limit for concept queries.
pub const DEFAULT_QUERY_LIMIT: u32 = 50;

/// Outcome of resolving one clinical drug for one target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one generalization was found.
    Resolved {
        /// The MPF or MP concept.
        concept: ConceptId,
        /// Query that produced it.
        tier: QueryTier,
    },
    /// Manual review is needed.
    Unresolved(UnresolvedReport),
}

impl Resolution {
    /// Returns the resolved concept, if any.
    pub fn concept(&self) -> Option<&ConceptId> {
        match self {
            Self::Resolved { concept, .. } => Some(concept),
            Self::Unresolved(_) => None,
        }
    }
}

/// Resolves clinical drugs to MPF and MP concepts through a [`ConceptQuery`].
pub struct ConceptResolver<'a, Q: ?Sized> {
    client: &'a Q,
    limit: u32,
}

impl<'a, Q: ConceptQuery + ?Sized> ConceptResolver<'a, Q> {
    /// Creates a resolver issuing queries with the default limit.
    pub fn new(client: &'a Q) -> Self {
        Self::with_limit(client, DEFAULT_QUERY_LIMIT)
    }

    /// Creates a resolver issuing queries with the given limit.
    pub fn with_limit(client: &'a Q, limit: u32) -> Self {
        Self { client, limit }
    }

    /// Resolves `clinical_drug` to a single concept of type `target`.
    pub async fn resolve(&self, clinical_drug: &ClinicalDrugId, target: TargetType) -> Resolution {
        let simple = simple_expression(target, clinical_drug);
        match self.run(&simple, QueryTier::Simple).await {
            Ok(PageVerdict::Ambiguous(count)) => {
                tracing::debug!(
                    "{} candidate {}s for CD {}, escalating",
                    count,
                    target,
                    clinical_drug
                );
            }
            Ok(verdict) => return conclude(clinical_drug, target, verdict, QueryTier::Simple),
            Err(reason) => return unresolved(clinical_drug, target, reason),
        }

        let escalated = escalated_expression(target, clinical_drug);
        match self.run(&escalated, QueryTier::Escalated).await {
            Ok(verdict) => conclude(clinical_drug, target, verdict, QueryTier::Escalated),
            Err(reason) => unresolved(clinical_drug, target, reason),
        }
    }

    async fn run(
        &self,
        expression: &EclExpression,
        tier: QueryTier,
    ) -> Result<PageVerdict, UnresolvedReason> {
        tracing::debug!("{} query: {}", tier, expression);
        match self.client.query(expression, self.limit).await {
            Ok(page) => Ok(page.verdict()),
            Err(err) => {
                tracing::warn!("{} query failed: {}", tier, err);
                Err(failure_reason(err, tier))
            }
        }
    }
}

/// Turns the final verdict at `tier` into a resolution.
fn conclude(
    clinical_drug: &ClinicalDrugId,
    target: TargetType,
    verdict: PageVerdict,
    tier: QueryTier,
) -> Resolution {
    let reason = match verdict {
        PageVerdict::Unique(concept) => {
            tracing::info!("{} {} for CD {}: {}", tier, target, clinical_drug, concept);
            return Resolution::Resolved { concept, tier };
        }
        PageVerdict::Empty => UnresolvedReason::NoCandidate { tier },
        PageVerdict::Ambiguous(count) => UnresolvedReason::Ambiguous { count },
        PageVerdict::Inconsistent { total, returned } => UnresolvedReason::InconsistentPage {
            tier,
            total,
            returned,
        },
    };
    unresolved(clinical_drug, target, reason)
}

fn unresolved(
    clinical_drug: &ClinicalDrugId,
    target: TargetType,
    reason: UnresolvedReason,
) -> Resolution {
    Resolution::Unresolved(UnresolvedReport {
        clinical_drug: clinical_drug.clone(),
        target,
        reason,
    })
}

fn failure_reason(err: ClientError, tier: QueryTier) -> UnresolvedReason {
    let message = err.to_string();
    if err.is_decode() {
        UnresolvedReason::Decode { tier, message }
    } else {
        UnresolvedReason::Transport { tier, message }
    }
}
