use crate::llm::client::{GatewayError, ModelBackend};

/// Instruction placed in front of every user request
pub const SYSTEM_INSTRUCTION: &str = r#"
You are an assistant that, when given a user instruction, MUST respond with a single JSON object ONLY and NOTHING ELSE.
Two allowed outputs:
1) Run a command:
{"action":"run_command", "command":"<shell command>", "reasoning":"<brief reasoning>"}
2) Reply:
{"action":"reply", "message":"<text>", "reasoning":"<brief reasoning>"}

Rules:
- If you choose run_command, prefer POSIX commands (find, ls, wc, grep, chmod, etc.) and avoid pipes or complex shell constructs. Use simple commands.
- DO NOT include dangerous commands (rm, dd, mkfs, shutdown, reboot, /dev/). If the user intent is destructive, respond with action=reply and a safe explanation.
- Workspace path for file actions is '/workspace' on the host. Use 'find /workspace ...' for searches.
Return JSON only.
"#;

/// Builds prompts and forwards them to a model backend
///
/// Holds no per-request state, so one gateway can serve concurrent requests.
pub struct AssistantGateway {
    backend: Box<dyn ModelBackend>,
}

impl AssistantGateway {
    pub fn new(backend: Box<dyn ModelBackend>) -> Self {
        Self { backend }
    }

    /// Prepend the system instruction to the user's request
    pub fn build_prompt(user_prompt: &str) -> String {
        format!("{}\nUser request: {}", SYSTEM_INSTRUCTION, user_prompt)
    }

    /// Send a user request and return the raw model text
    pub async fn ask(&self, user_prompt: &str) -> Result<String, GatewayError> {
        let prompt = Self::build_prompt(user_prompt);
        self.backend.complete(&prompt).await
    }
}
