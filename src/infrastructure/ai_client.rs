// src/infrastructure/ai_client.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::ai::AiQueryClient,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;

/// Posts prompts to `{base_url}/query` and returns the JSON body verbatim.
#[derive(Clone)]
pub struct HttpAiQueryClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAiQueryClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApplicationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/query", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl AiQueryClient for HttpAiQueryClient {
    async fn query(&self, prompt: &str) -> ApplicationResult<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|err| ApplicationError::upstream(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApplicationError::upstream(format!(
                "AI service answered {status}"
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| ApplicationError::upstream(format!("invalid AI response: {err}")))
    }
}
