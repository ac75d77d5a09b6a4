//! Per-screen authorization guard.
//!
//! Each navigable screen declares a static `AccessPolicy`; a navigation
//! attempt resolves to `Unauthenticated`, `Denied` or `Permitted` from the
//! current session. The guard gates UI rendering only; the server re-validates
//! every request, so nothing here is a security boundary.

use crate::session::{Role, Session};

/// Declarative access rule attached to a screen at registration time.
/// `admin_only` wins over the other fields; an empty policy is unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    pub admin_only: bool,
    pub required_role: Option<Role>,
    pub allowed_roles: &'static [Role],
}

pub const OPEN: AccessPolicy = AccessPolicy { admin_only: false, required_role: None, allowed_roles: &[] };
pub const ADMIN_ONLY: AccessPolicy = AccessPolicy { admin_only: true, required_role: None, allowed_roles: &[] };

impl AccessPolicy {
    pub const fn require(role: Role) -> Self {
        AccessPolicy { admin_only: false, required_role: Some(role), allowed_roles: &[] }
    }

    pub const fn allow(roles: &'static [Role]) -> Self {
        AccessPolicy { admin_only: false, required_role: None, allowed_roles: roles }
    }

    /// Text describing what the policy requires, as shown on the denial
    /// notice: the required role, or ADMIN for admin-only, or the allow-list.
    pub fn required_text(&self) -> String {
        if let Some(r) = self.required_role {
            return r.as_str().to_string();
        }
        if self.admin_only {
            return Role::Admin.as_str().to_string();
        }
        self.allowed_roles.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ")
    }
}

/// Outcome of one navigation attempt. Terminal until the next navigation or
/// notifier pulse re-renders the hosting page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No token: switch to the login screen, discarding the destination.
    Unauthenticated,
    /// In-place access-denied notice; not a redirect.
    Denied { required: String, actual: String },
    Permitted,
}

/// Evaluate a policy against the current session.
///
/// Order matters: authentication first, then admin_only, then "no
/// requirement", then required_role, then the allow-list. A non-empty
/// allow-list always admits ANALYST whether or not it is listed; this
/// mirrors the behavior the backend's clients grew to depend on (see
/// DESIGN.md before changing it).
pub fn evaluate(session: &Session, policy: &AccessPolicy) -> Access {
    if !session.authenticated() {
        return Access::Unauthenticated;
    }
    let role = session.role;
    let permitted = if policy.admin_only {
        role == Role::Admin
    } else if policy.required_role.is_none() && policy.allowed_roles.is_empty() {
        true
    } else if let Some(required) = policy.required_role {
        role == required
    } else {
        policy.allowed_roles.contains(&role) || role == Role::Analyst
    };
    if permitted {
        Access::Permitted
    } else {
        Access::Denied { required: policy.required_text(), actual: role.as_str().to_string() }
    }
}

/// A navigable screen and its statically attached policy.
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    pub name: &'static str,
    pub title: &'static str,
    pub policy: AccessPolicy,
}

/// Every protected screen of the console. The login screen is public and not
/// listed here.
pub const SCREENS: &[Screen] = &[
    Screen { name: "dashboard", title: "Dashboard", policy: OPEN },
    Screen { name: "customers", title: "Customers", policy: OPEN },
    Screen { name: "customer", title: "Customer Details", policy: OPEN },
    Screen { name: "register", title: "Add Customer", policy: AccessPolicy::require(Role::Admin) },
    Screen { name: "edit", title: "Edit Customer", policy: AccessPolicy::require(Role::Admin) },
    Screen { name: "users", title: "User Management", policy: AccessPolicy::require(Role::Admin) },
    Screen { name: "user-register", title: "Register User", policy: AccessPolicy::require(Role::Admin) },
    Screen { name: "user-edit", title: "Edit User", policy: AccessPolicy::require(Role::Admin) },
    Screen { name: "analytics", title: "Analytics", policy: AccessPolicy::allow(&[Role::Admin, Role::Analyst]) },
];

pub fn screen(name: &str) -> Option<&'static Screen> {
    SCREENS.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_role(role: Role) -> Session { Session::new("tok", role, "someone") }

    #[test]
    fn no_token_is_unauthenticated_for_every_policy() {
        let anon = Session::empty();
        for s in SCREENS {
            assert_eq!(evaluate(&anon, &s.policy), Access::Unauthenticated, "screen {}", s.name);
        }
        // even a stored role does not authenticate
        let role_only = Session { token: None, role: Role::Admin, username: Some("admin".into()) };
        assert_eq!(evaluate(&role_only, &ADMIN_ONLY), Access::Unauthenticated);
    }

    #[test]
    fn open_policy_permits_any_role() {
        for r in [Role::Admin, Role::SalesRep, Role::Analyst, Role::User, Role::Unset] {
            assert_eq!(evaluate(&with_role(r), &OPEN), Access::Permitted);
        }
    }

    #[test]
    fn admin_only_permits_admin_alone() {
        assert_eq!(evaluate(&with_role(Role::Admin), &ADMIN_ONLY), Access::Permitted);
        for r in [Role::SalesRep, Role::Analyst, Role::User, Role::Unset] {
            match evaluate(&with_role(r), &ADMIN_ONLY) {
                Access::Denied { required, .. } => assert_eq!(required, "ADMIN"),
                other => panic!("expected Denied for {:?}, got {:?}", r, other),
            }
        }
    }

    #[test]
    fn required_role_is_exact_match() {
        let policy = AccessPolicy::require(Role::Admin);
        assert_eq!(evaluate(&with_role(Role::Admin), &policy), Access::Permitted);
        match evaluate(&with_role(Role::SalesRep), &policy) {
            Access::Denied { required, actual } => {
                assert!(required.contains("ADMIN"));
                assert_eq!(actual, "SALES_REP");
            }
            other => panic!("expected Denied, got {:?}", other),
        }
        // analyst carve-out does NOT apply to required_role
        assert!(matches!(evaluate(&with_role(Role::Analyst), &policy), Access::Denied { .. }));
    }

    #[test]
    fn allow_list_membership_and_analyst_carve_out() {
        let policy = AccessPolicy::allow(&[Role::Admin]);
        assert_eq!(evaluate(&with_role(Role::Admin), &policy), Access::Permitted);
        // ANALYST is admitted by every non-empty allow-list, listed or not
        assert_eq!(evaluate(&with_role(Role::Analyst), &policy), Access::Permitted);
        assert!(matches!(evaluate(&with_role(Role::SalesRep), &policy), Access::Denied { .. }));
        assert!(matches!(evaluate(&with_role(Role::User), &policy), Access::Denied { .. }));
    }

    #[test]
    fn denial_text_shows_allow_list() {
        let policy = AccessPolicy::allow(&[Role::Admin, Role::Analyst]);
        match evaluate(&with_role(Role::User), &policy) {
            Access::Denied { required, actual } => {
                assert_eq!(required, "ADMIN, ANALYST");
                assert_eq!(actual, "USER");
            }
            other => panic!("expected Denied, got {:?}", other),
        }
    }

    #[test]
    fn screen_registry_resolves_policies() {
        assert_eq!(screen("analytics").unwrap().policy, AccessPolicy::allow(&[Role::Admin, Role::Analyst]));
        assert_eq!(screen("users").unwrap().policy, AccessPolicy::require(Role::Admin));
        assert_eq!(screen("dashboard").unwrap().policy, OPEN);
        assert!(screen("nope").is_none());
    }
}
