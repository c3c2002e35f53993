pub mod confirm;
pub mod gate;
pub mod runner;

pub use confirm::{Confirmer, StdinConfirmer};
pub use gate::{ExecutionGate, GateError, GateOptions, GateOutcome};
pub use runner::{CommandRunner, ExecutionOutcome, ExecutionRecord, LaunchError, Launcher};
