//! Authorization guard properties across the full screen registry: positive
//! and negative paths for every policy shape, plus the denial text contract.

use clientele::guard::{self, Access, AccessPolicy, Screen, ADMIN_ONLY, OPEN, SCREENS};
use clientele::session::{Role, Session};

fn session(role: Role) -> Session {
    Session::new("some-token", role, "whoever")
}

#[test]
fn missing_token_blocks_every_screen_regardless_of_policy() {
    let anon = Session::empty();
    for screen in SCREENS {
        assert_eq!(
            guard::evaluate(&anon, &screen.policy),
            Access::Unauthenticated,
            "screen '{}' must not render for an anonymous session",
            screen.name
        );
    }
    // a stored role without a token still does not authenticate
    let half = Session { token: None, role: Role::Admin, username: Some("admin".into()) };
    assert_eq!(guard::evaluate(&half, &OPEN), Access::Unauthenticated);
}

#[test]
fn sales_rep_cannot_reach_admin_screens() {
    let rep = session(Role::SalesRep);
    for name in ["register", "edit", "users", "user-register", "user-edit"] {
        match guard::evaluate(&rep, &guard::screen(name).unwrap().policy) {
            Access::Denied { required, actual } => {
                assert!(required.contains("ADMIN"), "denial for '{}' must name ADMIN", name);
                assert_eq!(actual, "SALES_REP");
            }
            other => panic!("expected Denied on '{}', got {:?}", name, other),
        }
    }
    // but the open screens render
    assert_eq!(guard::evaluate(&rep, &guard::screen("dashboard").unwrap().policy), Access::Permitted);
    assert_eq!(guard::evaluate(&rep, &guard::screen("customers").unwrap().policy), Access::Permitted);
}

#[test]
fn analytics_allow_list_admits_admin_and_analyst() {
    let policy = guard::screen("analytics").unwrap().policy;
    assert_eq!(guard::evaluate(&session(Role::Admin), &policy), Access::Permitted);
    assert_eq!(guard::evaluate(&session(Role::Analyst), &policy), Access::Permitted);
    assert!(matches!(guard::evaluate(&session(Role::SalesRep), &policy), Access::Denied { .. }));
    assert!(matches!(guard::evaluate(&session(Role::User), &policy), Access::Denied { .. }));
}

#[test]
fn analyst_is_admitted_by_any_non_empty_allow_list() {
    // even one that does not mention ANALYST at all
    let policy = AccessPolicy::allow(&[Role::SalesRep]);
    assert_eq!(guard::evaluate(&session(Role::Analyst), &policy), Access::Permitted);
    // the carve-out does not leak into the other policy shapes
    assert!(matches!(guard::evaluate(&session(Role::Analyst), &ADMIN_ONLY), Access::Denied { .. }));
    assert!(matches!(
        guard::evaluate(&session(Role::Analyst), &AccessPolicy::require(Role::SalesRep)),
        Access::Denied { .. }
    ));
}

#[test]
fn admin_reaches_everything() {
    let admin = session(Role::Admin);
    for screen in SCREENS {
        assert_eq!(
            guard::evaluate(&admin, &screen.policy),
            Access::Permitted,
            "screen '{}'",
            screen.name
        );
    }
}

#[test]
fn unknown_stored_role_is_denied_not_crashed() {
    let odd = session(Role::Unset);
    assert_eq!(guard::evaluate(&odd, &OPEN), Access::Permitted);
    match guard::evaluate(&odd, &ADMIN_ONLY) {
        Access::Denied { actual, .. } => assert_eq!(actual, "Unknown"),
        other => panic!("expected Denied, got {:?}", other),
    }
}

#[test]
fn denial_is_terminal_until_session_changes() {
    let policy = guard::screen("users").unwrap().policy;
    let rep = session(Role::SalesRep);
    // re-evaluating with the same session keeps yielding the same decision
    let first = guard::evaluate(&rep, &policy);
    let second = guard::evaluate(&rep, &policy);
    assert_eq!(first, second);
    // a pulse-driven re-render with a changed session flips it
    let promoted = session(Role::Admin);
    assert_eq!(guard::evaluate(&promoted, &policy), Access::Permitted);
}

#[test]
fn registry_names_are_unique() {
    for (i, Screen { name, .. }) in SCREENS.iter().enumerate() {
        assert!(SCREENS.iter().skip(i + 1).all(|s| s.name != *name), "duplicate screen '{}'", name);
    }
}
