pub mod ai_client;
pub mod database;
pub mod events;
pub mod ids;
pub mod repositories;
pub mod search_index;
pub mod security;
pub mod time;
