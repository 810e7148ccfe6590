use super::AiQueryService;
use crate::application::error::{ApplicationError, ApplicationResult};

pub struct AskAiQuery {
    pub prompt: String,
}

impl AiQueryService {
    /// Forward the prompt to the AI service and return its JSON answer as-is.
    pub async fn ask(&self, query: AskAiQuery) -> ApplicationResult<serde_json::Value> {
        if query.prompt.trim().is_empty() {
            return Err(ApplicationError::validation("the prompt field is required"));
        }

        self.client.query(&query.prompt).await.map_err(|err| {
            tracing::error!(error = %err, "AI service request failed");
            match err {
                ApplicationError::Upstream(_) => err,
                other => ApplicationError::upstream(other.to_string()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ai::AiQueryClient;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    struct Echo;

    #[async_trait]
    impl AiQueryClient for Echo {
        async fn query(&self, prompt: &str) -> ApplicationResult<serde_json::Value> {
            Ok(json!({ "response": prompt }))
        }
    }

    struct Broken;

    #[async_trait]
    impl AiQueryClient for Broken {
        async fn query(&self, _prompt: &str) -> ApplicationResult<serde_json::Value> {
            Err(ApplicationError::infrastructure("connection refused"))
        }
    }

    #[tokio::test]
    async fn blank_prompt_is_a_validation_error() {
        let service = AiQueryService::new(Arc::new(Echo));
        let err = service
            .ask(AskAiQuery {
                prompt: "  ".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[tokio::test]
    async fn answer_is_passed_through() {
        let service = AiQueryService::new(Arc::new(Echo));
        let body = service
            .ask(AskAiQuery {
                prompt: "capital of France?".into(),
            })
            .await
            .unwrap();
        assert_eq!(body, json!({ "response": "capital of France?" }));
    }

    #[tokio::test]
    async fn client_failures_surface_as_upstream() {
        let service = AiQueryService::new(Arc::new(Broken));
        let err = service
            .ask(AskAiQuery {
                prompt: "hi".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Upstream(_)));
    }
}
