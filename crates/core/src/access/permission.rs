use serde::{Deserialize, Serialize};

use crate::calendar::Permission;

/// The kind of access a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionType {
    Read,
    Write,
}

impl PermissionType {
    /// Returns true if a grant carrying `granted` allows this access.
    ///
    /// | requested | satisfied by            |
    /// |-----------|-------------------------|
    /// | `Read`    | `read`, `read_write`    |
    /// | `Write`   | `write`, `read_write`   |
    pub fn is_satisfied_by(self, granted: Permission) -> bool {
        matches!(
            (self, granted),
            (PermissionType::Read, Permission::Read | Permission::ReadWrite)
                | (PermissionType::Write, Permission::Write | Permission::ReadWrite)
        )
    }
}

impl std::fmt::Display for PermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionType::Read => f.write_str("read"),
            PermissionType::Write => f.write_str("write"),
        }
    }
}
