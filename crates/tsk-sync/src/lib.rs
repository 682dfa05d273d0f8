//! # tsk-sync
//!
//! Client-side task state synchronizer.
//!
//! [`TaskSynchronizer`] keeps an in-memory collection of tasks consistent
//! with the remote task API through optimistic mutations: each create,
//! toggle, update or delete is applied locally first, then reconciled with
//! the server response or rolled back on failure. Display status is
//! resolved from the server status, the local [`StatusCache`](tsk_cache::StatusCache)
//! and the legacy completion flag, in that order (see [`resolve`]).

pub mod board;
mod collection;
pub mod error;
pub mod resolve;
pub mod summary;
mod synchronizer;

#[cfg(test)]
mod test_support;

pub use collection::Settled;
pub use error::SyncError;
pub use synchronizer::TaskSynchronizer;
