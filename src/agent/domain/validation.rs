//! Agent draft validation owned by the agent domain.

use super::record::AgentDraft;
use serde_json::Value;

/// Validate a typed draft before it is handed to a store.
pub fn validate_draft(draft: &AgentDraft) -> Result<(), String> {
    if draft.name.trim().is_empty() {
        return Err("Agent name cannot be empty".to_string());
    }
    Ok(())
}

/// Build a draft from untyped adapter input.
///
/// `name` and `description` must be strings (description may be empty), `tags` must be an
/// array of strings. An `id` field is rejected: identifiers are never caller supplied.
pub fn draft_from_json(input: &Value) -> Result<AgentDraft, String> {
    let object = input
        .as_object()
        .ok_or_else(|| "Agent input must be a JSON object".to_string())?;

    if object.contains_key("id") {
        return Err("Field 'id' is assigned by the catalog and cannot be supplied".to_string());
    }

    let name = required_string(object, "name")?;
    let description = required_string(object, "description")?;

    let tags = match object.get("tags") {
        None => return Err("Missing required field 'tags'".to_string()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Null => Err(format!("Field 'tags[{}]' cannot be null", i)),
                other => Err(format!(
                    "Field 'tags[{}]' must be a string, got {}",
                    i,
                    json_type_name(other)
                )),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(format!(
                "Field 'tags' must be an array of strings, got {}",
                json_type_name(other)
            ))
        }
    };

    let draft = AgentDraft {
        name,
        description,
        tags,
    };
    validate_draft(&draft)?;
    Ok(draft)
}

fn required_string(object: &serde_json::Map<String, Value>, field: &str) -> Result<String, String> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(format!("Missing required field '{}'", field)),
        Some(other) => Err(format!(
            "Field '{}' must be a string, got {}",
            field,
            json_type_name(other)
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
