use crate::config::GatewayConfig;
use crate::llm::client::{GatewayError, ModelBackend};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completions backend (Hugging Face router or any compatible endpoint)
pub struct HuggingFaceBackend {
    endpoint: String,
    api_key: String,
    model: String,
    http_client: Client,
}

impl HuggingFaceBackend {
    /// Build a backend from gateway configuration
    ///
    /// Fails when no credential is configured.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GatewayError::MissingCredential(config.api_key_env.clone()))?;

        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::ApiError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
            http_client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn extract_content(body: &str) -> Result<String, GatewayError> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| GatewayError::InvalidResponse(format!("{}: {}", e, body)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::InvalidResponse("No content in response".to_string()))
    }
}

#[async_trait]
impl ModelBackend for HuggingFaceBackend {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            prompt_len = prompt.len(),
            "sending prompt to model backend"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::ApiError(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let content = Self::extract_content(&body)?;
        tracing::debug!(response_len = content.len(), "model backend replied");

        Ok(content)
    }
}
