use crate::config::ExecutionConfig;
use crate::security::{prepare_argv, ArgvError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// How a launched command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Success,
    NonZeroExit,
}

/// Result of a command that actually started
#[derive(Debug, Clone)]
pub struct ExecutionRecord {
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub outcome: ExecutionOutcome,
}

/// The command could not be run to completion
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("refusing to launch: {0}")]
    Argv(#[from] ArgvError),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Starts confirmed commands
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn launch(&self, command: &str) -> Result<ExecutionRecord, LaunchError>;
}

/// Launches commands as argument vectors, without a shell, under a timeout
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
    working_dir: Option<PathBuf>,
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            working_dir: None,
        }
    }

    pub fn from_config(config: &ExecutionConfig) -> Self {
        Self {
            timeout: config.timeout(),
            working_dir: config.working_dir.clone(),
        }
    }

    /// Run children in the given directory
    #[must_use]
    pub fn with_working_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn process_output(command: &str, output: Output) -> ExecutionRecord {
        let exit_code = output.status.code().unwrap_or(-1);
        let outcome = if output.status.success() {
            ExecutionOutcome::Success
        } else {
            ExecutionOutcome::NonZeroExit
        };

        ExecutionRecord {
            command: command.to_string(),
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            outcome,
        }
    }
}

#[async_trait]
impl Launcher for CommandRunner {
    async fn launch(&self, command: &str) -> Result<ExecutionRecord, LaunchError> {
        let argv = prepare_argv(command)?;

        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..])
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        // Dropping the output future on timeout kills the child
        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| LaunchError::Timeout(self.timeout))?
            .map_err(|source| LaunchError::Spawn {
                program: argv[0].clone(),
                source,
            })?;

        Ok(Self::process_output(command, output))
    }
}
