//! Order-insensitive equivalence of tool-call sets.
//!
//! Every call is reduced to a canonical string (object keys sorted, `null`
//! object members dropped, arrays untouched) and the two sides are compared
//! as multisets of those strings.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::parser::ToolCall;

/// Calls left unmatched on each side of a failed comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSetMismatch {
    /// Every generated call, canonicalized, in generation order.
    pub generated: Vec<String>,
    /// Every expected call, canonicalized, in ground-truth order.
    pub expected: Vec<String>,
    /// Generated calls with no counterpart in the ground truth.
    pub unexpected: Vec<String>,
    /// Expected calls the model did not produce.
    pub missing: Vec<String>,
}

/// Canonical string form of a JSON value.
///
/// Structurally equal values produce byte-identical output regardless of the
/// key order they were written with.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Canonical string form of a tool call.
pub fn canonical_call(call: &ToolCall) -> String {
    canonical_json(&call.to_value())
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> =
                map.iter().filter(|(_, v)| !v.is_null()).collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, val)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // Serializing a string key cannot fail.
                let _ = write!(out, "{}", Value::String(key.clone()));
                out.push(':');
                write_canonical(val, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => {
            let _ = write!(out, "{scalar}");
        }
    }
}

/// `true` when both slices hold the same calls with the same multiplicities.
pub fn compare_tool_calls(generated: &[ToolCall], expected: &[ToolCall]) -> bool {
    diff_tool_calls(generated, expected).is_none()
}

/// Compare two call sets, returning what differs when they are not equivalent.
///
/// A length mismatch short-circuits: the returned mismatch then only carries
/// the canonical forms of both sides, without the per-call breakdown.
pub fn diff_tool_calls(generated: &[ToolCall], expected: &[ToolCall]) -> Option<CallSetMismatch> {
    if generated.len() != expected.len() {
        return Some(CallSetMismatch {
            generated: generated.iter().map(canonical_call).collect(),
            expected: expected.iter().map(canonical_call).collect(),
            unexpected: Vec::new(),
            missing: Vec::new(),
        });
    }

    let generated_keys: Vec<String> = generated.iter().map(canonical_call).collect();
    let expected_keys: Vec<String> = expected.iter().map(canonical_call).collect();

    let mut counts: HashMap<&str, i64> = HashMap::new();
    for key in &generated_keys {
        *counts.entry(key.as_str()).or_default() += 1;
    }
    for key in &expected_keys {
        *counts.entry(key.as_str()).or_default() -= 1;
    }

    if counts.values().all(|&c| c == 0) {
        return None;
    }

    let mut unexpected = Vec::new();
    let mut missing = Vec::new();
    for (key, count) in &counts {
        for _ in 0..count.unsigned_abs() {
            if *count > 0 {
                unexpected.push((*key).to_string());
            } else {
                missing.push((*key).to_string());
            }
        }
    }
    unexpected.sort();
    missing.sort();

    Some(CallSetMismatch {
        generated: generated_keys,
        expected: expected_keys,
        unexpected,
        missing,
    })
}
