pub mod client;
pub mod gateway;
pub mod huggingface;

pub use client::{GatewayError, ModelBackend};
pub use gateway::AssistantGateway;
pub use huggingface::HuggingFaceBackend;
