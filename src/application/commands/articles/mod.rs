// src/application/commands/articles/mod.rs
mod create;
mod service;

pub use create::{CreateArticleCommand, CreateArticleCommandBuilder, MAX_TITLE_LENGTH};
pub use service::ArticleCommandService;
