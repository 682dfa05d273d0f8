pub mod auth;
pub mod board;
pub mod dispatch;
pub mod schema;
pub mod shared;
pub mod summary;
pub mod task;
