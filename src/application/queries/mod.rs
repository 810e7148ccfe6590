pub mod ai;
pub mod articles;
pub mod users;
