//! Navigation gate.
//!
//! A pure function of `(loading, session, required role)`. It never navigates
//! itself; callers act on the returned [`GuardDecision`].

use crate::auth::{RoleLevel, Session};

/// Where a redirect sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Unauthorized,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Unauthorized => "/unauthorized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore still running; show a neutral pending state.
    Pending,
    Redirect(Route),
    Allow,
}

/// The condition a guarded view requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Authenticated,
    MinimumRole(RoleLevel),
}

impl Gate {
    pub fn required_role(&self) -> Option<RoleLevel> {
        match self {
            Gate::Authenticated => None,
            Gate::MinimumRole(role) => Some(*role),
        }
    }

    pub fn evaluate(&self, loading: bool, session: Option<&Session>) -> GuardDecision {
        evaluate(loading, session, self.required_role())
    }
}

pub fn evaluate(
    loading: bool,
    session: Option<&Session>,
    required_role: Option<RoleLevel>,
) -> GuardDecision {
    if loading {
        return GuardDecision::Pending;
    }

    let Some(session) = session else {
        return GuardDecision::Redirect(Route::Login);
    };

    match required_role {
        Some(role) if !session.has_role(role) => GuardDecision::Redirect(Route::Unauthorized),
        _ => GuardDecision::Allow,
    }
}
