#![allow(missing_docs)]
#![allow(dead_code)]
#![allow(clippy::needless_raw_string_hashes)]

use jsonscan::Value;

pub const DOCUMENT: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": "2",
            "features": [
                "serde",
                "tokio"
            ]
        }
    },
    "snippets": [
        "fn main() {}",
        "println!(\"hi\")"
    ],
    "entities": [
        {
            "type": "function",
            "name": "main",
            "line": 1
        },
        {
            "type": "macro",
            "name": "println",
            "line": 2.5e0
        }
    ],
    "matrix": [
        [
            "a"
        ],
        []
    ],
    "mixed": [
        true,
        false,
        null,
        -0.125,
        "é😀\t"
    ]
}
"#;

/// Converts a scanned value into `serde_json`'s model for comparison.
///
/// Integral numbers become integers, matching how `serde_json` parses `1`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_serde(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
            if *n >= 0.0 {
                serde_json::Value::from(*n as u64)
            } else {
                serde_json::Value::from(*n as i64)
            }
        }
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_serde).collect()),
        Value::Object(members) => serde_json::Value::Object(
            members
                .iter()
                .map(|(k, v)| (k.clone(), to_serde(v)))
                .collect(),
        ),
    }
}
