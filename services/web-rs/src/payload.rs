//! Safe field access over loosely-shaped gateway JSON.
//!
//! Every helper here answers "absent or wrong type" with a default instead of an
//! error, so derivation over a malformed analytics payload degrades to empty output.

use serde_json::Value;

/// Walk `path` through nested objects.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.as_object()?.get(*key))
}

/// The array at `path`, or an empty slice when it is missing or not an array.
pub fn array_at<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First field among `keys` that renders as text.
pub fn text_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(scalar_text))
}

/// First field among `keys` that is present, read as a click count.
pub fn count_field(value: &Value, keys: &[&str]) -> u64 {
    count_of(keys.iter().find_map(|key| value.get(*key)))
}

/// Strings as-is, numbers without a trailing `.0`; anything else is `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64()?;
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    Some(format!("{}", f as i64))
                } else {
                    Some(f.to_string())
                }
            }
        }
        _ => None,
    }
}

/// Finite, non-negative integer from a number or numeric string. Anything else is 0.
/// Fractional counts are truncated.
pub fn count_of(value: Option<&Value>) -> u64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    match raw {
        Some(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}

/// Truthiness as the gateway's producers understand it: null, false, 0 and "" are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
