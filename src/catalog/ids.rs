//! Identifier allocation and parsing per `IdPolicy`.

use crate::agent::AgentRecord;
use crate::error::ApiError;
use crate::store::IdPolicy;
use crate::types::AgentId;

/// One more than the largest numeric id in `existing`, or "1" when there is none.
///
/// Ids that are not decimal integers are skipped rather than rejected. Comparison and
/// increment work on the decimal digits, so ids of any length are handled.
pub fn next_sequential_id(existing: &[AgentRecord]) -> AgentId {
    existing
        .iter()
        .filter_map(|record| numeric_digits(&record.id))
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        .map(increment_decimal)
        .unwrap_or_else(|| "1".to_string())
}

/// Significant digits of a decimal integer id, without leading zeros ("0" for zero).
fn numeric_digits(id: &str) -> Option<&str> {
    let id = id.trim();
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let significant = id.trim_start_matches('0');
    Some(if significant.is_empty() { "0" } else { significant })
}

fn increment_decimal(digits: &str) -> AgentId {
    let mut out = digits.as_bytes().to_vec();
    for digit in out.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    // every digit carried
    out.insert(0, b'1');
    String::from_utf8_lossy(&out).into_owned()
}

/// Validate a caller-supplied identifier against the store's representation.
pub fn parse_identifier(policy: IdPolicy, raw: &str) -> Result<AgentId, ApiError> {
    match policy {
        IdPolicy::Sequential => {
            if raw.trim().is_empty() {
                return Err(ApiError::InvalidIdentifier(
                    "identifier cannot be blank".to_string(),
                ));
            }
            Ok(raw.to_string())
        }
        IdPolicy::StoreAssigned => raw
            .trim()
            .parse::<u64>()
            .map(|id| id.to_string())
            .map_err(|_| {
                ApiError::InvalidIdentifier(format!("'{}' is not a numeric identifier", raw))
            }),
    }
}
