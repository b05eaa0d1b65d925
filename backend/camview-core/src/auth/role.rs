//! Ordered role ladder.
//!
//! The backend sends roles as small integers. A higher number carries every
//! capability of the lower ones, so all checks are `>=` comparisons.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleLevel(pub u8);

impl RoleLevel {
    /// Live cameras only.
    pub const VIEWER: RoleLevel = RoleLevel(1);
    /// Recordings and clothing search.
    pub const OPERATOR: RoleLevel = RoleLevel(2);
    /// Detection configuration and user administration.
    pub const ADMIN: RoleLevel = RoleLevel(3);

    pub fn value(&self) -> u8 {
        self.0
    }

    /// True if this role grants everything `required` grants.
    pub fn satisfies(&self, required: RoleLevel) -> bool {
        *self >= required
    }

    /// Display label. Levels the client does not know are shown as viewer.
    pub fn label(&self) -> &'static str {
        match self.0 {
            2 => "Operator",
            3 => "Administrator",
            _ => "Viewer",
        }
    }
}

impl From<u8> for RoleLevel {
    fn from(level: u8) -> Self {
        RoleLevel(level)
    }
}

impl std::fmt::Display for RoleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.0)
    }
}
