use crate::auth::role::RoleLevel;

use common::RedactedToken;

use serde::{Deserialize, Serialize};

/// User record as returned by `api/auth/me`, the login response and the
/// user-administration endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub role: RoleLevel,
}

/// The authenticated session. Owned by [`SessionManager`](crate::auth::SessionManager).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: u64,
    pub username: String,
    pub role: RoleLevel,
    pub token: RedactedToken,
}

impl Session {
    pub fn new(user: User, token: RedactedToken) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: user.role,
            token,
        }
    }

    pub fn has_role(&self, min_level: RoleLevel) -> bool {
        self.role.satisfies(min_level)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub access_token: String,
    pub user: User,
}
