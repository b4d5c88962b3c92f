//! Tool bridge
//!
//! Exposes catalog operations as named tools taking JSON arguments and returning text
//! content, the shape consumed by automated clients. Framing and transport live elsewhere.

use crate::agent::draft_from_json;
use crate::catalog::AgentCatalog;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

pub const LIST_AGENTS: &str = "list-agents";
pub const ADD_AGENT: &str = "add-agent";
pub const GET_AGENT: &str = "get-agent";

/// Advertised tool with its JSON input schema.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Result of a tool call. Catalog failures are reported in-band with `is_error` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolOutput {
    fn text(text: String) -> Self {
        Self {
            content: vec![ToolContent {
                kind: "text".to_string(),
                text,
            }],
            is_error: false,
        }
    }

    fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        let text = serde_json::to_string_pretty(value).map_err(|e| {
            ApiError::StoreUnavailable(crate::error::StorageError::Serialization(e.to_string()))
        })?;
        Ok(Self::text(text))
    }

    fn error(err: &ApiError) -> Self {
        let payload = json!({ "error": err.kind(), "message": err.to_string() });
        Self {
            is_error: true,
            ..Self::text(payload.to_string())
        }
    }

    /// Concatenated text of all content items.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListAgentsArgs {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    tags: Option<String>,
}

pub struct ToolBridge {
    catalog: AgentCatalog,
}

impl ToolBridge {
    pub fn new(catalog: AgentCatalog) -> Self {
        Self { catalog }
    }

    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: LIST_AGENTS,
                description: "List catalog agents, optionally filtered by a text query \
                              (matched against name and description) and comma-separated tags \
                              (all must match).",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": { "type": "string" },
                        "tags": { "type": "string" }
                    }
                }),
            },
            ToolDefinition {
                name: ADD_AGENT,
                description: "Add an agent to the catalog and return it with its assigned id.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "tags": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": ["name", "description", "tags"]
                }),
            },
            ToolDefinition {
                name: GET_AGENT,
                description: "Fetch one agent by id.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" }
                    },
                    "required": ["id"]
                }),
            },
        ]
    }

    /// Invoke tool `name`. Only an unknown tool name is an `Err`.
    pub fn call(&self, name: &str, args: &Value) -> Result<ToolOutput, ApiError> {
        debug!(tool = name, "Tool call");
        let result = match name {
            LIST_AGENTS => self.list_agents(args),
            ADD_AGENT => self.add_agent(args),
            GET_AGENT => self.get_agent(args),
            other => return Err(ApiError::UnknownTool(other.to_string())),
        };
        Ok(result.unwrap_or_else(|e| ToolOutput::error(&e)))
    }

    fn list_agents(&self, args: &Value) -> Result<ToolOutput, ApiError> {
        let args: ListAgentsArgs = if args.is_null() {
            ListAgentsArgs::default()
        } else {
            serde_json::from_value(args.clone())
                .map_err(|e| ApiError::ValidationError(e.to_string()))?
        };
        let agents = self
            .catalog
            .search(args.query.as_deref(), args.tags.as_deref())?;
        ToolOutput::json(&agents)
    }

    fn add_agent(&self, args: &Value) -> Result<ToolOutput, ApiError> {
        let draft = draft_from_json(args).map_err(ApiError::ValidationError)?;
        let created = self.catalog.create(draft)?;
        ToolOutput::json(&created)
    }

    fn get_agent(&self, args: &Value) -> Result<ToolOutput, ApiError> {
        let id = match args.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                return Err(ApiError::ValidationError(
                    "Missing required field 'id'".to_string(),
                ))
            }
        };
        let agent = self.catalog.get_by_id(&id)?;
        ToolOutput::json(&agent)
    }
}
