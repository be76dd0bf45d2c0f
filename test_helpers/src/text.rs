//! Text helpers for values captured from behavioural scenarios.

use serde_json::Value;

/// Removes a single pair of matching outer quotes from `value`.
#[must_use]
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .or_else(|| {
            value
                .strip_prefix('\'')
                .and_then(|inner| inner.strip_suffix('\''))
        })
        .unwrap_or(value)
}

/// Interprets a scenario literal as JSON, falling back to a plain string.
///
/// `3`, `true`, and `null` parse as their JSON values. `'prod'` and `prod`
/// both become the string `"prod"`.
#[must_use]
pub fn parse_scalar(value: &str) -> Value {
    let trimmed = value.trim();
    if trimmed.starts_with('\'') {
        return Value::String(unquote(trimmed).to_owned());
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(unquote(trimmed).to_owned()))
}
