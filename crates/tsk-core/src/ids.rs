//! Temporary ID generation for optimistic placeholders.
//!
//! Server IDs are opaque strings. Placeholders created before the server
//! confirms a task carry the `temp-` prefix so they can never collide with,
//! or be mistaken for, a server-assigned ID.

/// Prefix marking a client-generated placeholder ID.
pub const TEMP_ID_PREFIX: &str = "temp-";

/// Generate a fresh placeholder ID: `temp-{32 hex chars}`.
#[must_use]
pub fn temp_id() -> String {
    format!("{TEMP_ID_PREFIX}{}", uuid::Uuid::new_v4().simple())
}

/// Whether `id` was produced by [`temp_id`].
#[must_use]
pub fn is_temporary(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}
