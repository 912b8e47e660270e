//! Helpers for parsing structured data out of model responses
//!
//! Model content regularly arrives wrapped in markdown code fences or
//! preceded by prose, so every routine that expects JSON goes through
//! [`json_from_response`] instead of parsing the raw text.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Strip a surrounding markdown code fence (with optional language tag)
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line (```json, ```html, ...)
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

/// Parse a JSON object out of a model response
///
/// Tries the fence-stripped text first; if that fails, retries on the
/// span between the first `{` and the last `}` to shed any surrounding
/// prose the model added.
pub fn json_from_response<T: DeserializeOwned>(text: &str) -> Result<T> {
    let body = strip_code_fences(text);

    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let start = body.find('{');
            let end = body.rfind('}');
            if let (Some(start), Some(end)) = (start, end) {
                if start < end {
                    if let Ok(value) = serde_json::from_str(&body[start..=end]) {
                        return Ok(value);
                    }
                }
            }
            Err(first_err).with_context(|| {
                let preview: String = body.chars().take(120).collect();
                format!("model response was not valid JSON (starts: {:?})", preview)
            })
        }
    }
}
