use super::*;

#[test]
fn light_preference_ignores_system_scheme() {
    assert!(!resolve_with_system(ThemePref::Light, true));
    assert!(!resolve_with_system(ThemePref::Light, false));
}

#[test]
fn dark_preference_ignores_system_scheme() {
    assert!(resolve_with_system(ThemePref::Dark, true));
    assert!(resolve_with_system(ThemePref::Dark, false));
}

#[test]
fn system_preference_follows_system_scheme() {
    assert!(resolve_with_system(ThemePref::System, true));
    assert!(!resolve_with_system(ThemePref::System, false));
}
