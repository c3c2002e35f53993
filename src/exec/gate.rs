use crate::audit::{AuditCategory, AuditLogger};
use crate::exec::confirm::Confirmer;
use crate::exec::runner::{ExecutionOutcome, ExecutionRecord, LaunchError, Launcher};
use crate::security::{ClassificationVerdict, Classifier};
use std::sync::Arc;
use thiserror::Error;

/// How a safe command proceeds after classification
///
/// Dry-run is checked before auto-confirm, so setting both never executes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateOptions {
    pub auto_confirm: bool,
    pub dry_run: bool,
}

/// Terminal state of one pass through the gate
#[derive(Debug)]
pub enum GateOutcome {
    Refused { verdict: ClassificationVerdict },
    DryRun,
    Declined,
    Completed(ExecutionRecord),
    LaunchFailed(LaunchError),
}

impl GateOutcome {
    /// Audit category recorded for this outcome
    pub fn category(&self) -> AuditCategory {
        match self {
            GateOutcome::Refused { .. } => AuditCategory::Refused,
            GateOutcome::DryRun => AuditCategory::DryRun,
            GateOutcome::Declined => AuditCategory::Aborted,
            GateOutcome::Completed(_) => AuditCategory::Executed,
            GateOutcome::LaunchFailed(_) => AuditCategory::ExecutionError,
        }
    }

    pub fn record(&self) -> Option<&ExecutionRecord> {
        match self {
            GateOutcome::Completed(record) => Some(record),
            _ => None,
        }
    }

    /// Short result string shown to the caller
    pub fn message(&self) -> String {
        match self {
            GateOutcome::Refused { .. } => "(refused unsafe)".to_string(),
            GateOutcome::DryRun => "(dry-run)".to_string(),
            GateOutcome::Declined => "(aborted)".to_string(),
            GateOutcome::Completed(record) => {
                let out = record.stdout.trim();
                let err = record.stderr.trim();
                match record.outcome {
                    ExecutionOutcome::Success if out.is_empty() => "(no stdout)".to_string(),
                    ExecutionOutcome::Success => out.to_string(),
                    ExecutionOutcome::NonZeroExit => format!(
                        "(exit {})\nSTDOUT:\n{}\nSTDERR:\n{}",
                        record.exit_code, out, err
                    ),
                }
            }
            GateOutcome::LaunchFailed(err) => format!("Execution error: {}", err),
        }
    }

    /// Notice printed before the result, if the outcome has one
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            GateOutcome::Refused { .. } => Some("Command flagged as unsafe. Refusing to run."),
            GateOutcome::DryRun => Some("[dry-run] Not executing."),
            GateOutcome::Declined => Some("Aborted by user."),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum GateError {
    /// The decision was made but its audit entry could not be written
    #[error("failed to write audit log: {source}")]
    AuditLog {
        outcome: Box<GateOutcome>,
        #[source]
        source: std::io::Error,
    },
}

impl GateError {
    /// The outcome that was decided before the failure
    pub fn outcome(&self) -> &GateOutcome {
        match self {
            GateError::AuditLog { outcome, .. } => outcome,
        }
    }
}

/// Classify, confirm, execute and audit one proposed command
pub struct ExecutionGate {
    classifier: Classifier,
    logger: AuditLogger,
    launcher: Box<dyn Launcher>,
    confirmer: Arc<dyn Confirmer>,
}

impl ExecutionGate {
    pub fn new(
        classifier: Classifier,
        logger: AuditLogger,
        launcher: Box<dyn Launcher>,
        confirmer: Box<dyn Confirmer>,
    ) -> Self {
        Self {
            classifier,
            logger,
            launcher,
            confirmer: Arc::from(confirmer),
        }
    }

    /// Drive a candidate command to a terminal state
    ///
    /// Exactly one audit entry is written per call. If that write fails the
    /// decided outcome is still returned inside [`GateError::AuditLog`].
    pub async fn run(&self, command: &str, options: GateOptions) -> Result<GateOutcome, GateError> {
        let verdict = self.classifier.classify(command);
        if !verdict.is_safe {
            tracing::warn!(
                command,
                pattern = verdict.matched_denylist_pattern.unwrap_or("<no allowlisted verb>"),
                "refusing unsafe command"
            );
            let logged = self.logger.log_refused(command);
            return Self::finish(GateOutcome::Refused { verdict }, logged);
        }

        if options.dry_run {
            let logged = self.logger.log_dry_run(command);
            return Self::finish(GateOutcome::DryRun, logged);
        }

        if !options.auto_confirm && !self.confirm(command).await {
            let logged = self.logger.log_aborted(command);
            return Self::finish(GateOutcome::Declined, logged);
        }

        match self.launcher.launch(command).await {
            Ok(record) => {
                tracing::info!(command, exit_code = record.exit_code, "command finished");
                let logged = self.logger.log_executed(
                    command,
                    record.exit_code,
                    &record.stdout,
                    &record.stderr,
                );
                Self::finish(GateOutcome::Completed(record), logged)
            }
            Err(err) => {
                tracing::warn!(command, error = %err, "command could not be launched");
                let logged = self.logger.log_execution_error(command, &err.to_string());
                Self::finish(GateOutcome::LaunchFailed(err), logged)
            }
        }
    }

    /// Ask the confirmer on a blocking thread; any failure is a no
    async fn confirm(&self, command: &str) -> bool {
        let confirmer = Arc::clone(&self.confirmer);
        let candidate = command.to_string();
        match tokio::task::spawn_blocking(move || confirmer.confirm(&candidate)).await {
            Ok(Ok(confirmed)) => confirmed,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "could not read confirmation, treating as no");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "confirmation task failed, treating as no");
                false
            }
        }
    }

    fn finish(outcome: GateOutcome, logged: std::io::Result<()>) -> Result<GateOutcome, GateError> {
        match logged {
            Ok(()) => Ok(outcome),
            Err(source) => Err(GateError::AuditLog {
                outcome: Box::new(outcome),
                source,
            }),
        }
    }
}
