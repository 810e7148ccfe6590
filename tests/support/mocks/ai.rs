// tests/support/mocks/ai.rs
use articles_api::application::{
    ApplicationResult, error::ApplicationError, ports::ai::AiQueryClient,
};
use async_trait::async_trait;
use serde_json::Value;

pub enum StubAiClient {
    Answer(Value),
    Fail,
}

#[async_trait]
impl AiQueryClient for StubAiClient {
    async fn query(&self, _prompt: &str) -> ApplicationResult<Value> {
        match self {
            Self::Answer(body) => Ok(body.clone()),
            Self::Fail => Err(ApplicationError::upstream("AI service answered 503")),
        }
    }
}
