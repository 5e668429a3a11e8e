// app/guards.rs
//! Gardes de navigation, synchrones et sans appel réseau.

use crate::app::routes::Route;
use crate::app::session::SessionContext;
use crate::models::Role;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Autorise uniquement une session valide
pub fn auth_guard(session: &SessionContext) -> GuardDecision {
    if session.is_logged_in() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(Route::Login)
    }
}

/// Autorise uniquement le rôle attendu ; un autre rôle est renvoyé vers son
/// propre tableau de bord
pub fn role_guard(session: &SessionContext, expected: Role) -> GuardDecision {
    match session.role() {
        Some(role) if role == expected => GuardDecision::Allow,
        Some(role) => {
            debug!("Rôle {} refusé (attendu {}), redirection", role, expected);
            GuardDecision::Redirect(role.dashboard())
        }
        None => GuardDecision::Redirect(Route::Login),
    }
}

/// Gardes d'une page : authentification puis rôle
pub fn can_activate(session: &SessionContext, route: Route) -> GuardDecision {
    let Some(expected) = route.required_role() else {
        return GuardDecision::Allow;
    };

    match auth_guard(session) {
        GuardDecision::Allow => role_guard(session, expected),
        redirect => redirect,
    }
}
