//! # tsk-core
//!
//! Core types shared across all tasksync crates:
//! - The [`entities::Task`] entity as displayed, and [`entities::TaskRecord`]
//!   as reported by the task API
//! - Create and update inputs with a builder for partial updates
//! - Status and priority enums
//! - [`scope::Scope`] (workspace vs personal) and temporary ID helpers
//! - Authenticated identity passed between crates
//! - Response types for summaries and board columns
//! - Lenient timestamp parsing for server payloads

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod responses;
pub mod scope;
pub mod timestamp;
