//! # tsk-client
//!
//! Request layer for the remote task API.
//!
//! [`TaskStore`] is the async boundary the synchronizer talks to;
//! [`HttpTaskStore`] implements it over `reqwest`, routing each call to the
//! personal (`/api/{user_id}/tasks`) or workspace
//! (`/api/workspaces/{ws}/tasks`) URL family.

mod error;
mod http;
mod http_store;
mod store;

pub use error::StoreError;
pub use http_store::HttpTaskStore;
pub use store::TaskStore;
