// src/application/ports/ai.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

#[async_trait]
pub trait AiQueryClient: Send + Sync {
    /// Send `prompt` upstream and hand back the JSON body it answered with.
    async fn query(&self, prompt: &str) -> ApplicationResult<serde_json::Value>;
}
