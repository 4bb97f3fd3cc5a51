use super::*;
use crate::net::types::Org;

fn membership(org_id: &str, role: MemberRole, name: Option<&str>) -> Membership {
    Membership {
        org_id: org_id.to_owned(),
        role,
        orgs: name.map(|n| Org {
            id: org_id.to_owned(),
            name: n.to_owned(),
            slug: String::new(),
        }),
    }
}

// =============================================================
// should_redirect_unauth
// =============================================================

#[test]
fn no_redirect_while_loading() {
    assert!(!should_redirect_unauth(true, false));
}

#[test]
fn no_redirect_with_user() {
    assert!(!should_redirect_unauth(false, true));
}

#[test]
fn redirect_when_loaded_without_user() {
    assert!(should_redirect_unauth(false, false));
}

// =============================================================
// pick_membership
// =============================================================

#[test]
fn pick_membership_prefers_owned_org() {
    let memberships = vec![
        membership("org-a", MemberRole::Member, Some("Shared")),
        membership("org-b", MemberRole::Owner, Some("Mine")),
    ];
    let picked = pick_membership(&memberships).unwrap();
    assert_eq!(picked.org_id, "org-b");
}

#[test]
fn pick_membership_falls_back_to_first() {
    let memberships = vec![
        membership("org-a", MemberRole::Member, Some("Shared")),
        membership("org-b", MemberRole::Admin, Some("Other")),
    ];
    let picked = pick_membership(&memberships).unwrap();
    assert_eq!(picked.org_id, "org-a");
}

#[test]
fn pick_membership_empty_returns_none() {
    assert!(pick_membership(&[]).is_none());
}

// =============================================================
// fallback_org_name
// =============================================================

#[test]
fn fallback_org_name_uses_local_part() {
    assert_eq!(fallback_org_name("ada@example.com"), "ada");
}

#[test]
fn fallback_org_name_without_at_uses_whole_string() {
    assert_eq!(fallback_org_name("ada"), "ada");
}

#[test]
fn fallback_org_name_empty_local_part_uses_placeholder() {
    assert_eq!(fallback_org_name("@example.com"), "workspace");
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn default_state_is_not_ready() {
    assert!(!AuthState::default().ready());
}

#[test]
fn adopt_records_org_id_and_name() {
    let mut state = AuthState::default();
    state.adopt(&membership("org-b", MemberRole::Owner, Some("Mine")));
    assert_eq!(state.org_id.as_deref(), Some("org-b"));
    assert_eq!(state.org_name.as_deref(), Some("Mine"));
}

#[test]
fn adopt_without_joined_org_falls_back_to_id() {
    let mut state = AuthState::default();
    state.adopt(&membership("org-c", MemberRole::Member, None));
    assert_eq!(state.org_name.as_deref(), Some("org-c"));
}

#[test]
fn setup_failure_message_includes_create_error() {
    let msg = setup_failure_message("ada@example.com", Some("orgs are disabled"));
    assert!(msg.contains("ada@example.com"));
    assert!(msg.contains("orgs are disabled"));
}

#[test]
fn setup_failure_message_without_create_error() {
    let msg = setup_failure_message("ada@example.com", None);
    assert!(msg.contains("No workspace membership"));
}
