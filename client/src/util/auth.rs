//! Session-token storage and shared auth UI behavior.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API is bearer-token authenticated; the token lives in localStorage
//! between visits. Route components apply identical unauthenticated redirect
//! behavior through [`install_unauth_redirect`].

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{AuthState, should_redirect_unauth};
use crate::util::storage;

/// localStorage key holding the session token.
pub const TOKEN_KEY: &str = "pocketry.token";

/// Read the stored session token, if any.
pub fn load_token() -> Option<String> {
    storage::get(TOKEN_KEY)
}

/// Persist the session token after a successful code verification.
pub fn save_token(token: &str) {
    storage::set(TOKEN_KEY, token);
}

/// Forget the session token (sign-out).
pub fn clear_token() {
    storage::remove(TOKEN_KEY);
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        if should_redirect_unauth(state.loading, state.user.is_some()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}
