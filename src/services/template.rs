//! Template Renderer
//!
//! Placeholder substitution for preset templates. Recognizes `{{key}}`
//! and `{{key|default}}` tokens; whitespace around key and default is
//! insignificant. Rendering never fails: unknown keys become the empty
//! string and malformed tokens pass through as literal text.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

/// The canonical placeholder every preset template must carry
pub const INPUT_PLACEHOLDER: &str = "{{input}}";

/// Key under which the primary user input is supplied
pub const INPUT_KEY: &str = "input";

/// Values accepted for substitution: strings, numbers, booleans
pub type TemplateInputs = HashMap<String, Value>;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([^}|]+)(?:\|([^}]+))?\s*\}\}").unwrap());

/// Build an input map carrying only the primary input
pub fn input_map(input: &str) -> TemplateInputs {
    let mut inputs = TemplateInputs::new();
    inputs.insert(INPUT_KEY.to_string(), Value::String(input.to_string()));
    inputs
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Render a template against the given inputs.
///
/// Resolution per token: a present, non-null input wins; otherwise the
/// default segment is substituted verbatim (no nested expansion);
/// otherwise the empty string. If the original template carried no
/// literal `{{input}}` token and a non-empty input is present, the raw
/// input is appended as a trailing block so it is never silently dropped.
pub fn render(template: &str, inputs: &TemplateInputs) -> String {
    let rendered = TOKEN_RE.replace_all(template, |caps: &Captures| {
        let key = caps[1].trim();
        match inputs.get(key) {
            Some(value) if !value.is_null() => value_to_string(value),
            _ => caps
                .get(2)
                .map(|d| d.as_str().trim().to_string())
                .unwrap_or_default(),
        }
    });

    if !template.contains(INPUT_PLACEHOLDER) {
        if let Some(value) = inputs.get(INPUT_KEY) {
            let raw = value_to_string(value);
            if !raw.is_empty() {
                return format!("{}\n\nUser input: {}", rendered, raw);
            }
        }
    }

    rendered.into_owned()
}

/// Distinct placeholder key names in first-occurrence order.
///
/// Recognizes the same grammar as `render`; used by editors for live
/// feedback while a template is being written.
pub fn extract_placeholder_names(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TOKEN_RE.captures_iter(template) {
        let key = caps[1].trim().to_string();
        if !key.is_empty() && !names.contains(&key) {
            names.push(key);
        }
    }
    names
}
