//! Access-control decision for a single navigation.
//!
//! `evaluate` is a pure function of the viewer's role (if signed in) and
//! the requested route. It never fails: every outcome is either the view
//! itself or a path to go to instead.

use crate::models::user::Role;
use crate::routing::routes::{home_path, Access, AppRoute, LOGIN_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render(AppRoute),
    Redirect(&'static str),
}

/// Decides what the viewer sees for `route`. `viewer` is `None` when signed out.
pub fn evaluate(route: AppRoute, viewer: Option<Role>) -> GuardDecision {
    match (route.access(), viewer) {
        (Access::PublicOnly, None) => GuardDecision::Render(route),
        (Access::PublicOnly, Some(role)) => GuardDecision::Redirect(home_path(role)),
        (Access::Redirecting, None) => GuardDecision::Redirect(LOGIN_PATH),
        (Access::Redirecting, Some(role)) => GuardDecision::Redirect(home_path(role)),
        (Access::Protected { allowed_roles }, viewer) => check_protected(route, allowed_roles, viewer),
    }
}

fn check_protected(route: AppRoute, allowed_roles: &[Role], viewer: Option<Role>) -> GuardDecision {
    let Some(role) = viewer else {
        return GuardDecision::Redirect(LOGIN_PATH);
    };
    if !allowed_roles.is_empty() && !allowed_roles.contains(&role) {
        return GuardDecision::Redirect(home_path(role));
    }
    GuardDecision::Render(route)
}
