use serde::{Deserialize, Serialize};

/// Closed set of account roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Administrator,
    #[default]
    Member,
}

impl Role {
    /// Whether this role may modify resources it does not own.
    pub fn can_moderate(self) -> bool {
        matches!(self, Role::Administrator)
    }
}
