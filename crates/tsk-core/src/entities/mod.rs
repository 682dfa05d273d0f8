//! Task entity structs.
//!
//! [`Task`] is what the collection holds and what callers see: its status is
//! always resolved. [`TaskRecord`] is what the task API returns: status may
//! be missing and several fields carry legacy fallbacks. Inputs for create
//! and partial update live alongside them.

mod input;
mod record;
mod task;

pub use input::{TaskCreate, TaskUpdate, TaskUpdateBuilder};
pub use record::TaskRecord;
pub use task::Task;
