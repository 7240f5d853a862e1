use serde_json::Value;

use crate::domain::{DomainError, Record};

/// Fields whose value is used as the whole embedding text, in priority order.
pub const PRIMARY_FIELDS: [&str; 3] = ["question", "QuestionText", "Question"];

/// Separator between `key: value` pairs when no primary field is present.
pub const FIELD_DELIMITER: &str = "\n";

/// Convert a record into the text that gets embedded.
///
/// The first non-blank primary field wins. Otherwise every field is rendered as
/// `key: value`, sorted by key so the result does not depend on the order the
/// fields were parsed in.
pub fn normalize_record(record: &Record) -> Result<String, DomainError> {
    if record.is_empty() {
        return Err(DomainError::invalid_record("record has no fields"));
    }

    if let Some(text) = primary_text(record) {
        return Ok(text);
    }

    let mut keys: Vec<&String> = record.keys().collect();
    keys.sort();

    let text = keys
        .into_iter()
        .map(|key| format!("{}: {}", key, value_to_text(&record[key.as_str()])))
        .collect::<Vec<_>>()
        .join(FIELD_DELIMITER);

    Ok(text)
}

fn primary_text(record: &Record) -> Option<String> {
    PRIMARY_FIELDS
        .iter()
        .filter_map(|field| record.get(*field))
        .filter(|value| !is_empty_value(value))
        .map(value_to_text)
        .find(|text| !text.trim().is_empty())
}

/// Null, `[]` and `{}` carry no question text.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Strings are used as-is; anything else is rendered as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
