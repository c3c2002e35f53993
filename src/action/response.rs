use crate::action::validator::{StructuredAction, ValidationFailure};
use serde::{Deserialize, Serialize};

/// Action payload as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionPayload {
    RunCommand { command: String, reasoning: String },
    Reply { message: String, reasoning: String },
}

/// Response shape of the query endpoint
///
/// Success: `{"result": {...}}`. Failure: `{"error": "<code>", "raw": "<text>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Success { result: ActionPayload },
    Failure { error: String, raw: String },
}

impl From<StructuredAction> for ActionPayload {
    fn from(action: StructuredAction) -> Self {
        match action {
            StructuredAction::RunCommand { command, reasoning } => {
                ActionPayload::RunCommand { command, reasoning }
            }
            StructuredAction::Reply { message, reasoning } => {
                ActionPayload::Reply { message, reasoning }
            }
        }
    }
}

impl From<ActionPayload> for StructuredAction {
    fn from(payload: ActionPayload) -> Self {
        match payload {
            ActionPayload::RunCommand { command, reasoning } => {
                StructuredAction::RunCommand { command, reasoning }
            }
            ActionPayload::Reply { message, reasoning } => {
                StructuredAction::Reply { message, reasoning }
            }
        }
    }
}

impl From<Result<StructuredAction, ValidationFailure>> for QueryResponse {
    fn from(outcome: Result<StructuredAction, ValidationFailure>) -> Self {
        match outcome {
            Ok(action) => QueryResponse::Success {
                result: action.into(),
            },
            Err(failure) => QueryResponse::Failure {
                error: failure.code().to_string(),
                raw: failure.raw_text().to_string(),
            },
        }
    }
}
