//! Task scope: workspace-owned or personal.

use std::fmt;

/// Which URL family a task operation targets.
///
/// A task's scope is fixed by its `workspace_id`: `None` means personal.
/// Every mutation on a task must use the scope the task was fetched or
/// created under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Tasks owned by the current user outside any workspace.
    #[default]
    Personal,
    /// Tasks belonging to the given workspace.
    Workspace(String),
}

impl Scope {
    /// Build a scope from an optional workspace ID. Blank IDs mean personal.
    #[must_use]
    pub fn from_workspace_id(workspace_id: Option<&str>) -> Self {
        match workspace_id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::Workspace(id.to_string()),
            _ => Self::Personal,
        }
    }

    #[must_use]
    pub fn workspace_id(&self) -> Option<&str> {
        match self {
            Self::Personal => None,
            Self::Workspace(id) => Some(id),
        }
    }

    #[must_use]
    pub const fn is_personal(&self) -> bool {
        matches!(self, Self::Personal)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal => f.write_str("personal"),
            Self::Workspace(id) => write!(f, "workspace:{id}"),
        }
    }
}
