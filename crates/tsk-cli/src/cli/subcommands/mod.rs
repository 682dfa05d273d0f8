pub mod auth;
pub mod board;

pub use auth::AuthCommands;
pub use board::BoardCommands;
