//! Upstream response-shape normalizer
//!
//! The MISO Workflow API returns its success payload at one of three
//! nesting depths depending on endpoint and version: `data.outputs.X`,
//! `outputs.X`, or top-level `X`. Every handler that consumes a workflow
//! result goes through this one parser instead of probing shapes ad hoc.

use serde_json::Value;

/// Candidate prefixes, tried in order of observed nesting depth.
/// The empty prefix covers the top-level shape.
const NESTINGS: [&[&str]; 3] = [&["data", "outputs"], &["outputs"], &[]];

/// Extract a named output field from an upstream body, normalized to a
/// string.
///
/// A string value is returned as-is; an array of strings is joined with
/// blank-line separators. The result is identical regardless of which
/// nesting shape carried the field. Returns `None` when no shape matches
/// or the value has an unusable type.
pub fn extract_field(body: &Value, field: &str) -> Option<String> {
    for prefix in NESTINGS {
        let Some(container) = descend(body, prefix) else {
            continue;
        };
        if let Some(value) = container.get(field) {
            if let Some(normalized) = normalize(value) {
                return Some(normalized);
            }
        }
    }
    None
}

/// Extract the whole `outputs` object for the generic workflow-run
/// surface. Falls back to the body itself when it is a bare object with
/// neither wrapper present.
pub fn extract_outputs(body: &Value) -> Option<Value> {
    for prefix in [&["data", "outputs"][..], &["outputs"][..]] {
        if let Some(outputs) = descend(body, prefix) {
            if outputs.is_object() {
                return Some(outputs.clone());
            }
        }
    }
    body.is_object().then(|| body.clone())
}

fn descend<'a>(body: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = body;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

fn normalize(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.len() == items.len() {
                Some(parts.join("\n\n"))
            } else {
                // Mixed-type arrays are not a known upstream shape
                None
            }
        }
        _ => None,
    }
}
