pub mod memory;
pub mod refresh_tokens;
pub mod users;
