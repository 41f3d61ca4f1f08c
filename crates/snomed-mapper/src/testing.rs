//! Scripted query fake and in-memory sink for resolver and orchestrator tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use snomed_client::{ClientError, ClientResult, ConceptQuery};
use snomed_types::{ConceptPage, EclExpression, MappingRecord, UnresolvedReport};

use crate::error::MapperResult;
use crate::sink::MappingSink;

/// Canned reply for one expression.
pub enum Reply {
    Page(ConceptPage),
    Unavailable,
    Garbled,
}

/// Answers queries by exact ECL text and records every expression asked.
///
/// Expressions without a scripted reply match nothing.
#[derive(Default)]
pub struct ScriptedQuery {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, expression: EclExpression, reply: Reply) -> Self {
        self.replies.insert(expression.to_string(), reply);
        self
    }

    pub fn page(self, expression: EclExpression, ids: &[&str]) -> Self {
        let page = ConceptPage::from_ids(ids.iter().copied());
        self.reply(expression, Reply::Page(page))
    }

    pub fn total(self, expression: EclExpression, total: u64) -> Self {
        let page = ConceptPage {
            items: Vec::new(),
            total,
        };
        self.reply(expression, Reply::Page(page))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConceptQuery for ScriptedQuery {
    async fn query(&self, expression: &EclExpression, _limit: u32) -> ClientResult<ConceptPage> {
        let key = expression.to_string();
        self.calls.lock().unwrap().push(key.clone());

        match self.replies.get(&key) {
            Some(Reply::Page(page)) => Ok(page.clone()),
            Some(Reply::Unavailable) => Err(ClientError::Status {
                status: 503,
                url: format!("http://snowstorm.test/concepts?ecl={key}"),
            }),
            Some(Reply::Garbled) => Err(ClientError::Decode {
                url: format!("http://snowstorm.test/concepts?ecl={key}"),
                source: serde_json::from_str::<ConceptPage>("<html>").unwrap_err(),
            }),
            None => Ok(ConceptPage::default()),
        }
    }
}

/// Keeps results in memory, in the order they were recorded.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub mappings: Vec<MappingRecord>,
    pub unresolved: Vec<UnresolvedReport>,
}

impl MappingSink for MemorySink {
    fn record_mapping(&mut self, record: &MappingRecord) -> MapperResult<()> {
        self.mappings.push(record.clone());
        Ok(())
    }

    fn record_unresolved(&mut self, report: &UnresolvedReport) -> MapperResult<()> {
        self.unresolved.push(report.clone());
        Ok(())
    }
}
