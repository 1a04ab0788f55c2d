//! `{placeholder}` substitution for route path templates
//!
//! Kept apart from the dispatch loop so it can be exercised on its own.

use etims_domain::{EtimsError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

#[allow(clippy::expect_used)]
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern is valid"));

/// Placeholder names in template order.
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER.captures_iter(template).map(|caps| caps[1].to_string()).collect()
}

/// Render `template`, substituting every `{name}` with the URL-encoded value
/// of `name` in `values`.
///
/// # Errors
/// Returns `EtimsError::Config` naming the first placeholder without a usable
/// value (absent, null, or a nested structure).
pub fn render_path(template: &str, values: Option<&Map<String, Value>>) -> Result<String> {
    for name in placeholders(template) {
        if values.and_then(|map| segment_value(map.get(&name))).is_none() {
            return Err(EtimsError::Config(format!("Missing required placeholder '{name}'")));
        }
    }

    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        values
            .and_then(|map| segment_value(map.get(&caps[1])))
            .map(|value| urlencoding::encode(&value).into_owned())
            .unwrap_or_default()
    });

    Ok(rendered.into_owned())
}

fn segment_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
