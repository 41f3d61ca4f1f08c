//! Mapping of a whole candidate set.

use std::fmt;

use snomed_client::ConceptQuery;
use snomed_types::{ClinicalDrugId, MappingRecord, TargetType, UnresolvedReport};

use crate::error::MapperResult;
use crate::resolver::{ConceptResolver, Resolution};
use crate::sink::MappingSink;

/// Everything produced by one mapping run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOutcome {
    /// Clinical drugs processed.
    pub clinical_drugs: usize,
    /// CD to MPF mappings.
    pub mpf_maps: Vec<MappingRecord>,
    /// CD to MP mappings.
    pub mp_maps: Vec<MappingRecord>,
    /// Cases needing manual review, for either target type.
    pub unresolved: Vec<UnresolvedReport>,
}

impl MappingOutcome {
    fn push_mapping(&mut self, record: MappingRecord) {
        match record.target {
            TargetType::Mpf => self.mpf_maps.push(record),
            TargetType::Mp => self.mp_maps.push(record),
        }
    }

    /// Returns counts for the closing log line.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            clinical_drugs: self.clinical_drugs,
            mpf_resolved: self.mpf_maps.len(),
            mp_resolved: self.mp_maps.len(),
            unresolved: self.unresolved.len(),
        }
    }
}

/// Counts of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Clinical drugs processed.
    pub clinical_drugs: usize,
    /// MPF mappings found.
    pub mpf_resolved: usize,
    /// MP mappings found.
    pub mp_resolved: usize,
    /// Unresolved reports written.
    pub unresolved: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} clinical drugs: {} MPF and {} MP mappings, {} unresolved",
            self.clinical_drugs, self.mpf_resolved, self.mp_resolved, self.unresolved
        )
    }
}

/// Resolves every candidate clinical drug to its MPF and MP.
///
/// Candidates are processed one at a time, MPF before MP. The two target
/// types are independent: an unresolved MPF never prevents the MP attempt.
pub struct MappingRun<'a, Q: ?Sized, S> {
    resolver: ConceptResolver<'a, Q>,
    sink: S,
}

impl<'a, Q: ConceptQuery + ?Sized, S: MappingSink> MappingRun<'a, Q, S> {
    /// Creates a run writing results to `sink`.
    pub fn new(resolver: ConceptResolver<'a, Q>, sink: S) -> Self {
        Self { resolver, sink }
    }

    /// Returns the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the run and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Maps every candidate, persisting each result as it is produced.
    ///
    /// Only sink failures abort the run.
    pub async fn run<I>(&mut self, candidates: I) -> MapperResult<MappingOutcome>
    where
        I: IntoIterator<Item = ClinicalDrugId>,
    {
        let mut outcome = MappingOutcome::default();

        for clinical_drug in candidates {
            outcome.clinical_drugs += 1;

            for target in TargetType::ALL {
                match self.resolver.resolve(&clinical_drug, target).await {
                    Resolution::Resolved { concept, .. } => {
                        let record = MappingRecord {
                            clinical_drug: clinical_drug.clone(),
                            concept,
                            target,
                        };
                        self.sink.record_mapping(&record)?;
                        outcome.push_mapping(record);
                    }
                    Resolution::Unresolved(report) => {
                        tracing::warn!("{}", report);
                        self.sink.record_unresolved(&report)?;
                        outcome.unresolved.push(report);
                    }
                }
            }
        }

        Ok(outcome)
    }
}
