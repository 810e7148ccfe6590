use std::sync::Arc;

use crate::application::ports::ai::AiQueryClient;

pub struct AiQueryService {
    pub(super) client: Arc<dyn AiQueryClient>,
}

impl AiQueryService {
    pub fn new(client: Arc<dyn AiQueryClient>) -> Self {
        Self { client }
    }
}
