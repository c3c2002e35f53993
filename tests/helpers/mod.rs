use async_trait::async_trait;
use hostai::audit::AuditLogger;
use hostai::exec::{CommandRunner, Confirmer};
use hostai::llm::{AssistantGateway, GatewayError, ModelBackend};
use hostai::{Classifier, Dispatcher, ExecutionGate};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Backend that always answers with the same text
pub struct CannedBackend {
    pub response: String,
}

#[async_trait]
impl ModelBackend for CannedBackend {
    async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
        Ok(self.response.clone())
    }
}

/// Confirmer with a fixed answer that counts how often it was asked
pub struct CountingConfirmer {
    pub answer: bool,
    pub asked: Arc<AtomicUsize>,
}

impl Confirmer for CountingConfirmer {
    fn confirm(&self, _command: &str) -> io::Result<bool> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

/// A temporary workspace with a few files, plus a log path beside it
pub struct TestHost {
    pub dir: TempDir,
    pub workspace: PathBuf,
    pub log_path: PathBuf,
    pub confirmations: Arc<AtomicUsize>,
}

impl TestHost {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let workspace = dir.path().join("workspace");
        fs::create_dir_all(workspace.join("docs")).unwrap();
        fs::write(workspace.join("readme.txt"), "hello\n").unwrap();
        fs::write(workspace.join("docs").join("guide.md"), "# guide\n").unwrap();

        let log_path = dir.path().join(".ai-cli").join("logs.txt");

        Self {
            dir,
            workspace,
            log_path,
            confirmations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Build a dispatcher whose model always returns `response`
    pub fn dispatcher(&self, response: &str, confirm_answer: bool) -> Dispatcher {
        let gateway = AssistantGateway::new(Box::new(CannedBackend {
            response: response.to_string(),
        }));
        let gate = ExecutionGate::new(
            Classifier::new(),
            AuditLogger::with_path(&self.log_path).unwrap(),
            Box::new(CommandRunner::new(Duration::from_secs(30)).with_working_dir(&self.workspace)),
            Box::new(CountingConfirmer {
                answer: confirm_answer,
                asked: Arc::clone(&self.confirmations),
            }),
        );
        Dispatcher::new(gateway, gate)
    }

    pub fn log_lines(&self) -> Vec<String> {
        read_lines(&self.log_path)
    }

    pub fn confirmations(&self) -> usize {
        self.confirmations.load(Ordering::SeqCst)
    }
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Model output for a run_command action
pub fn run_command_json(command: &str) -> String {
    serde_json::json!({
        "action": "run_command",
        "command": command,
        "reasoning": "test",
    })
    .to_string()
}
