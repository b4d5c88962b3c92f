//! Agent record and its id-less draft.

use crate::types::AgentId;
use serde::{Deserialize, Deserializer, Serialize};

/// A catalog entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Always written as a string; older collections may hold JSON numbers.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: AgentId,
    pub name: String,
    pub description: String,
    /// Case preserved as supplied; order is kept for display.
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredId {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<AgentId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StoredId::deserialize(deserializer)? {
        StoredId::Text(id) => id,
        StoredId::Number(id) => id.to_string(),
    })
}

/// Input to `create`: a record without its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDraft {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl AgentDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach an assigned identifier.
    pub fn into_record(self, id: AgentId) -> AgentRecord {
        AgentRecord {
            id,
            name: self.name,
            description: self.description,
            tags: self.tags,
        }
    }
}

impl AgentRecord {
    /// Tags lowercased for case-insensitive comparison.
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.to_lowercase()).collect()
    }
}
