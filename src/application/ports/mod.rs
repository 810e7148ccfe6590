// src/application/ports/mod.rs
pub mod ai;
pub mod events;
pub mod ids;
pub mod security;
pub mod session_revocation;
pub mod time;
