use serde_json::{Map, Value};
use thiserror::Error;

/// Validated action proposed by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredAction {
    RunCommand { command: String, reasoning: String },
    Reply { message: String, reasoning: String },
}

impl StructuredAction {
    pub fn reasoning(&self) -> &str {
        match self {
            StructuredAction::RunCommand { reasoning, .. } => reasoning,
            StructuredAction::Reply { reasoning, .. } => reasoning,
        }
    }
}

/// Model output that could not be turned into a [`StructuredAction`]
///
/// Both variants carry the complete raw model text for diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("model output is not JSON")]
    NotJson { raw_text: String },

    #[error("model output has an invalid action")]
    InvalidAction { raw_text: String },
}

impl ValidationFailure {
    /// Wire code used by the query endpoint
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::NotJson { .. } => "model_output_not_json",
            ValidationFailure::InvalidAction { .. } => "invalid_action",
        }
    }

    pub fn raw_text(&self) -> &str {
        match self {
            ValidationFailure::NotJson { raw_text } => raw_text,
            ValidationFailure::InvalidAction { raw_text } => raw_text,
        }
    }
}

/// Interpret raw model text as a structured action
pub fn validate(raw_text: &str) -> Result<StructuredAction, ValidationFailure> {
    let not_json = || ValidationFailure::NotJson {
        raw_text: raw_text.to_string(),
    };
    let invalid = || ValidationFailure::InvalidAction {
        raw_text: raw_text.to_string(),
    };

    let object_text = extract_json_object(raw_text).ok_or_else(not_json)?;
    let value: Value = serde_json::from_str(object_text).map_err(|_| not_json())?;
    let Value::Object(fields) = value else {
        return Err(not_json());
    };

    let reasoning = string_field(&fields, "reasoning");
    match fields.get("action").and_then(Value::as_str) {
        Some("run_command") => {
            let command = string_field(&fields, "command").ok_or_else(invalid)?;
            Ok(StructuredAction::RunCommand {
                command,
                reasoning: reasoning.ok_or_else(invalid)?,
            })
        }
        Some("reply") => {
            let message = string_field(&fields, "message").ok_or_else(invalid)?;
            Ok(StructuredAction::Reply {
                message,
                reasoning: reasoning.ok_or_else(invalid)?,
            })
        }
        _ => Err(invalid()),
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_string)
}

/// Find the first balanced `{...}` object in free text
///
/// Tracks nesting depth and string literals (with backslash escapes) so
/// braces inside strings do not end the object early. When an opening brace
/// never balances, the scan resumes at the next `{` after it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = balanced_end(&bytes[start..]) {
            return Some(&text[start..start + end]);
        }
        search_from = start + 1;
    }

    None
}

/// Length of the balanced object at the start of `bytes`, if it closes
fn balanced_end(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
