pub mod create;
pub mod delete;
pub mod list;
pub mod toggle;
pub mod update;
