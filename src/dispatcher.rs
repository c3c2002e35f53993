use crate::action::{validate, QueryResponse, StructuredAction, ValidationFailure};
use crate::exec::{ExecutionGate, GateError, GateOptions, GateOutcome};
use crate::llm::{AssistantGateway, GatewayError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Model output error: {0}")]
    OutputFormat(#[from] ValidationFailure),

    #[error("Execution gate error: {0}")]
    Gate(#[from] GateError),
}

/// What one prompt turned into
#[derive(Debug)]
pub enum DispatchOutcome {
    Reply {
        message: String,
        reasoning: String,
    },
    Command {
        command: String,
        reasoning: String,
        outcome: GateOutcome,
    },
}

/// Routes a user prompt through the model, the validator and the gate
pub struct Dispatcher {
    gateway: AssistantGateway,
    gate: ExecutionGate,
}

impl Dispatcher {
    pub fn new(gateway: AssistantGateway, gate: ExecutionGate) -> Self {
        Self { gateway, gate }
    }

    /// Ask the model and return the query endpoint response shape
    ///
    /// Output-format failures become `{"error", "raw"}` responses; only
    /// gateway failures are errors here.
    pub async fn query(&self, prompt: &str) -> Result<QueryResponse, GatewayError> {
        let raw = self.gateway.ask(prompt).await?;
        Ok(QueryResponse::from(validate(&raw)))
    }

    /// Ask the model and validate its answer into an action
    pub async fn propose(&self, prompt: &str) -> Result<StructuredAction, DispatchError> {
        let raw = self.gateway.ask(prompt).await?;
        let action = validate(&raw).inspect_err(|failure| {
            tracing::warn!(code = failure.code(), raw_len = raw.len(), "model output rejected");
        })?;
        Ok(action)
    }

    /// Send a `run_command` action through the gate; a `reply` passes straight through
    pub async fn route(
        &self,
        action: StructuredAction,
        options: GateOptions,
    ) -> Result<DispatchOutcome, GateError> {
        match action {
            StructuredAction::Reply { message, reasoning } => {
                Ok(DispatchOutcome::Reply { message, reasoning })
            }
            StructuredAction::RunCommand { command, reasoning } => {
                let outcome = self.gate.run(&command, options).await?;
                Ok(DispatchOutcome::Command {
                    command,
                    reasoning,
                    outcome,
                })
            }
        }
    }

    /// Propose and route in one step
    pub async fn dispatch(
        &self,
        prompt: &str,
        options: GateOptions,
    ) -> Result<DispatchOutcome, DispatchError> {
        let action = self.propose(prompt).await?;
        Ok(self.route(action, options).await?)
    }
}
