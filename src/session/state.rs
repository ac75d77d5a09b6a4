use serde::{Deserialize, Serialize};

/// Roles as issued by the backend. `Unset` covers a missing or unrecognized
/// stored role; it is advisory display data, never trusted beyond UI gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    SalesRep,
    Analyst,
    User,
    #[serde(other)]
    Unset,
}

impl Role {
    /// Wire/storage label for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::SalesRep => "SALES_REP",
            Role::Analyst => "ANALYST",
            Role::User => "USER",
            Role::Unset => "Unknown",
        }
    }

    /// Parse a stored/wire label; anything unrecognized maps to Unset.
    pub fn parse(s: &str) -> Role {
        match s {
            "ADMIN" => Role::Admin,
            "SALES_REP" => Role::SalesRep,
            "ANALYST" => Role::Analyst,
            "USER" => Role::User,
            _ => Role::Unset,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated identity cached client-side. Token present means
/// authenticated; role and username are advisory and carry no independent
/// validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Role,
    pub username: Option<String>,
}

impl Session {
    pub fn empty() -> Self { Self { token: None, role: Role::Unset, username: None } }

    pub fn new<T: Into<String>, U: Into<String>>(token: T, role: Role, username: U) -> Self {
        Self { token: Some(token.into()), role, username: Some(username.into()) }
    }

    pub fn authenticated(&self) -> bool { self.token.is_some() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_labels_round_trip() {
        for r in [Role::Admin, Role::SalesRep, Role::Analyst, Role::User] {
            assert_eq!(Role::parse(r.as_str()), r);
        }
        assert_eq!(Role::parse("MANAGER"), Role::Unset);
        assert_eq!(Role::parse(""), Role::Unset);
    }

    #[test]
    fn token_presence_is_authentication() {
        assert!(!Session::empty().authenticated());
        assert!(Session::new("t", Role::User, "u").authenticated());
        // role alone does not authenticate
        let s = Session { token: None, role: Role::Admin, username: Some("admin".into()) };
        assert!(!s.authenticated());
    }
}
