//! Query and tag filtering.
//!
//! Matching is plain substring containment on name/description and exact, case-insensitive
//! tag membership. No tokenizing or ranking.

use crate::agent::AgentRecord;

/// Normalized form of the optional `query` and `tags` filter strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Trimmed, lowercased query; `None` when absent or blank.
    pub query: Option<String>,
    /// Trimmed, lowercased, non-empty requested tags; empty means no tag filter.
    pub tags: Vec<String>,
}

impl SearchFilter {
    pub fn parse(query: Option<&str>, tags: Option<&str>) -> Self {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let tags = tags
            .map(|raw| {
                raw.split(',')
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self { query, tags }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.tags.is_empty()
    }

    pub fn matches(&self, record: &AgentRecord) -> bool {
        if let Some(ref q) = self.query {
            let in_name = record.name.to_lowercase().contains(q.as_str());
            if !in_name && !record.description.to_lowercase().contains(q.as_str()) {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let record_tags = record.normalized_tags();
            if !self.tags.iter().all(|t| record_tags.contains(t)) {
                return false;
            }
        }

        true
    }

    /// Retain matching records, preserving their order.
    pub fn apply(&self, records: Vec<AgentRecord>) -> Vec<AgentRecord> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
