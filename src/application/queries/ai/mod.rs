mod ask;
mod service;

pub use ask::AskAiQuery;
pub use service::AiQueryService;
