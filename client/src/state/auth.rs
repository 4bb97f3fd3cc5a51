//! Auth-session state: current user, active org, and bootstrap repair.
//!
//! DESIGN
//! ======
//! The app shell resolves identity once after mount: fetch the user, list
//! memberships, and adopt an org. A user with no membership gets exactly one
//! repair attempt (create a personal org, re-list); if the backend still
//! reports no membership the shell renders a setup-error panel instead of
//! guessing further. The decision logic lives here as pure functions so the
//! repair path is testable without HTTP.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{MemberRole, Membership, SessionUser};

/// Authentication state tracking the current user, org, and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    /// Adopted org id, set once bootstrap succeeds.
    pub org_id: Option<String>,
    /// Display name of the adopted org.
    pub org_name: Option<String>,
    pub loading: bool,
    /// Terminal bootstrap failure; renders the setup-error panel.
    pub setup_error: Option<String>,
}

impl AuthState {
    /// True once a user and org are both resolved.
    #[must_use]
    pub fn ready(&self) -> bool {
        self.user.is_some() && self.org_id.is_some()
    }

    /// Record the membership picked by bootstrap.
    pub fn adopt(&mut self, membership: &Membership) {
        self.org_id = Some(membership.org_id.clone());
        self.org_name = Some(membership.org_name().to_owned());
    }
}

/// True when the guarded page should bounce to `/login`.
#[must_use]
pub fn should_redirect_unauth(loading: bool, has_user: bool) -> bool {
    !loading && !has_user
}

/// Pick the membership to adopt: an owned org wins, otherwise the first one.
#[must_use]
pub fn pick_membership(memberships: &[Membership]) -> Option<&Membership> {
    memberships
        .iter()
        .find(|m| m.role == MemberRole::Owner)
        .or_else(|| memberships.first())
}

/// Name for the repair-path org, derived from the email's local part.
#[must_use]
pub fn fallback_org_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    if local.is_empty() {
        "workspace".to_owned()
    } else {
        local.to_owned()
    }
}

/// Diagnostic for the setup-error panel when repair did not produce a
/// membership.
#[must_use]
pub fn setup_failure_message(email: &str, create_error: Option<&str>) -> String {
    match create_error {
        Some(err) => format!("Could not prepare a workspace for {email}: {err}"),
        None => format!("No workspace membership was found for {email} after setup."),
    }
}
