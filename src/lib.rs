pub mod action;
pub mod audit;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod exec;
pub mod llm;
pub mod security;

// Re-export commonly used types for convenience
pub use action::{QueryResponse, StructuredAction, ValidationFailure};
pub use config::Config;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{AppError, AppResult};
pub use exec::{ExecutionGate, GateOptions, GateOutcome};
pub use security::{ClassificationVerdict, Classifier};
