//! Masking of sensitive parameter values before they reach the log.

use crate::types::RequestParam;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref SENSITIVE_KEY: Regex = Regex::new(
        r"(?i)(pass(word|wd)?|pwd|secret|token|api[_-]?key|^key$|(^|[_-])auth($|[_-])|authorization|credential|session|cookie|(^|[_-])sign($|[_-])|signature)"
    )
    .expect("sensitive key pattern is valid");
}

pub fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEY.is_match(key)
}

/// Mask a secret while keeping enough of it to tell values apart.
pub fn mask_sensitive_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 12 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

fn redact_value(key: &str, value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_value(k, v)))
                .collect(),
        ),
        Value::Array(items) if is_sensitive_key(key) => {
            Value::Array(items.iter().map(|_| Value::String("***".into())).collect())
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| redact_value(key, v)).collect())
        }
        Value::Null => Value::Null,
        Value::String(s) if is_sensitive_key(key) => Value::String(mask_sensitive_value(s)),
        other if is_sensitive_key(key) => Value::String(mask_sensitive_value(&other.to_string())),
        other => other.clone(),
    }
}

/// Copy of `params` as JSON with sensitive values masked (nested objects included).
pub fn redact_params(params: &RequestParam) -> Value {
    Value::Object(
        params
            .iter()
            .map(|(k, v)| (k.clone(), redact_value(k, v)))
            .collect(),
    )
}

/// JSON text for the request log line.
pub fn format_params_for_logging(params: &RequestParam, redact: bool) -> String {
    if redact {
        redact_params(params).to_string()
    } else {
        params.to_json()
    }
}
