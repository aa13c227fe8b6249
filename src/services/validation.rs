//! Preset and Input Validation
//!
//! Structural checks on candidate presets and on raw enhancement input.
//! Validation never fails with an error: it returns a report listing every
//! violation so editors can show them all at once.

use crate::models::preset::PresetDraft;
use crate::services::template::INPUT_PLACEHOLDER;

/// Maximum number of custom presets kept in storage
pub const MAX_CUSTOM_PRESETS: usize = 20;

/// Field length ceilings
pub const MAX_PRESET_NAME_LENGTH: usize = 100;
pub const MAX_TEMPLATE_LENGTH: usize = 10_000;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_PRESET_TAGS: usize = 10;
pub const MAX_TAG_LENGTH: usize = 30;

/// Enhancement input bounds
pub const MIN_INPUT_LENGTH: usize = 3;
pub const MAX_INPUT_LENGTH: usize = 10_000;

/// Hard ceiling on stored history items, whatever settings ask for
pub const MAX_HISTORY_ITEMS: usize = 100;

/// Outcome of a validation pass; `valid` is true iff `errors` is empty
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// All violations joined into one human-readable line
    pub fn message(&self) -> String {
        self.errors.join("; ")
    }
}

/// Validate a candidate preset, accumulating every violation.
///
/// The `|default` form does not satisfy the placeholder requirement: the
/// bare `{{input}}` token must be present so every render path receives
/// live user input without relying on the renderer's fallback.
pub fn validate_preset(draft: &PresetDraft) -> ValidationReport {
    let mut errors = Vec::new();

    let name = draft.name.as_deref().unwrap_or("").trim();
    if name.is_empty() {
        errors.push("name is required".to_string());
    }

    let template = draft.system_prompt.as_deref().unwrap_or("").trim();
    if template.is_empty() {
        errors.push("systemPrompt is required".to_string());
    }

    if !template.is_empty() && !template.contains(INPUT_PLACEHOLDER) {
        errors.push(format!(
            "systemPrompt must contain the {} placeholder to receive user input",
            INPUT_PLACEHOLDER
        ));
    }

    if name.chars().count() > MAX_PRESET_NAME_LENGTH {
        errors.push(format!(
            "name must be {} characters or less",
            MAX_PRESET_NAME_LENGTH
        ));
    }

    if template.chars().count() > MAX_TEMPLATE_LENGTH {
        errors.push(format!(
            "systemPrompt must be {} characters or less",
            MAX_TEMPLATE_LENGTH
        ));
    }

    if let Some(description) = &draft.description {
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            errors.push(format!(
                "description must be {} characters or less",
                MAX_DESCRIPTION_LENGTH
            ));
        }
    }

    if let Some(tags) = &draft.tags {
        if tags.len() > MAX_PRESET_TAGS {
            errors.push(format!("a maximum of {} tags is allowed", MAX_PRESET_TAGS));
        }
        for tag in tags {
            if tag.chars().count() > MAX_TAG_LENGTH {
                errors.push(format!(
                    "tag \"{}\" is too long (max {} characters)",
                    tag, MAX_TAG_LENGTH
                ));
            }
        }
    }

    ValidationReport::from_errors(errors)
}

/// Normalize raw input text: CRLF/CR to LF, runs of blank lines collapsed.
pub fn sanitize_input(input: &str) -> String {
    let normalized = input.trim().replace("\r\n", "\n").replace('\r', "\n");

    // Collapse three or more consecutive newlines down to a blank line.
    let mut out = String::with_capacity(normalized.len());
    let mut newline_run = 0usize;
    for ch in normalized.chars() {
        if ch == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push(ch);
            }
        } else {
            newline_run = 0;
            out.push(ch);
        }
    }
    out
}

/// Validate raw enhancement input against the length bounds.
pub fn validate_input_text(input: &str) -> ValidationReport {
    let trimmed = input.trim();
    let mut errors = Vec::new();

    if trimmed.is_empty() {
        errors.push("No text found in clipboard. Copy some text and try again.".to_string());
    } else if trimmed.chars().count() < MIN_INPUT_LENGTH {
        errors.push(format!(
            "Prompt must be at least {} characters long.",
            MIN_INPUT_LENGTH
        ));
    } else if trimmed.chars().count() > MAX_INPUT_LENGTH {
        errors.push(format!(
            "Prompt cannot exceed {} characters.",
            MAX_INPUT_LENGTH
        ));
    }

    ValidationReport::from_errors(errors)
}
