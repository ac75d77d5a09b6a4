//! Login, logout and account registration.

use serde_json::json;
use tracing::{debug, info};

use crate::client::{ApiClient, MOCK_TOKEN_PREFIX};
use crate::error::{ApiError, ApiResult};
use crate::models::{Account, LoginResponse};
use crate::session::{pulse, Role, Session};
use crate::validate;

use super::decode;

/// Demo accounts honored when mock mode is enabled.
const MOCK_USERS: &[(&str, &str, Role)] = &[
    ("admin", "admin123", Role::Admin),
    ("sales", "sales123", Role::SalesRep),
    ("analyst", "analyst123", Role::Analyst),
    ("user", "user123", Role::User),
];

/// Authenticate and persist the resulting session. On success the store
/// holds the new identity and one notifier pulse has been delivered.
pub async fn login(client: &ApiClient, username: &str, password: &str, use_mock: bool) -> ApiResult<Session> {
    validate::login_form(username, password)?;

    let session = if use_mock {
        mock_login(username, password)?
    } else {
        let payload = json!({"username": username, "password": password});
        let resp: LoginResponse = decode(client.post("/api/auth/login", &payload).await?)?;
        let Some(token) = resp.token.clone().filter(|t| !t.is_empty()) else {
            return Err(ApiError::http(200, "Invalid server response - no token received"));
        };
        Session::new(token, resp.resolved_role(), resp.resolved_username(username))
    };

    client
        .store()
        .set(&session)
        .map_err(|e| ApiError::http(0, format!("could not persist session: {}", e)))?;
    info!(target: "clientele::auth", "login user={:?} role={}", session.username, session.role);
    pulse();
    Ok(session)
}

fn mock_login(username: &str, password: &str) -> ApiResult<Session> {
    let hit = MOCK_USERS.iter().find(|(u, p, _)| *u == username && *p == password);
    match hit {
        Some((u, _, role)) => {
            let mut buf = [0u8; 8];
            let _ = getrandom::getrandom(&mut buf);
            let token = format!("{}{:016x}", MOCK_TOKEN_PREFIX, u64::from_le_bytes(buf));
            debug!(target: "clientele::auth", "mock login user={}", u);
            Ok(Session::new(token, *role, *u))
        }
        None => Err(ApiError::unauthorized("Invalid credentials")),
    }
}

/// Clear the local session, tell the backend best-effort, pulse observers.
/// The local clear always happens whether or not the backend call succeeds.
pub async fn logout(client: &ApiClient) -> ApiResult<()> {
    client
        .store()
        .clear()
        .map_err(|e| ApiError::http(0, format!("could not clear session: {}", e)))?;
    if let Err(e) = client.post_empty("/api/auth/logout").await {
        debug!(target: "clientele::auth", "logout call failed, local session already cleared: {}", e);
    }
    info!(target: "clientele::auth", "logout");
    pulse();
    Ok(())
}

/// Register a backend account (server enforces the admin gate).
pub async fn register(client: &ApiClient, username: &str, password: &str, role: Role) -> ApiResult<Account> {
    let payload = json!({"username": username, "password": password, "role": role.as_str()});
    decode(client.post("/api/auth/register", &payload).await?)
}

/// The identity the backend sees for the current credential.
pub async fn me(client: &ApiClient) -> ApiResult<Account> {
    decode(client.get("/api/auth/me").await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_table_covers_every_role() {
        let roles: Vec<Role> = MOCK_USERS.iter().map(|(_, _, r)| *r).collect();
        assert!(roles.contains(&Role::Admin));
        assert!(roles.contains(&Role::SalesRep));
        assert!(roles.contains(&Role::Analyst));
        assert!(roles.contains(&Role::User));
    }

    #[test]
    fn mock_login_issues_unattachable_tokens() {
        let s = mock_login("admin", "admin123").unwrap();
        assert!(s.token.unwrap().starts_with(MOCK_TOKEN_PREFIX));
        assert_eq!(s.role, Role::Admin);
    }

    #[test]
    fn mock_login_rejects_bad_credentials() {
        assert!(mock_login("admin", "wrong").is_err());
        assert!(mock_login("ghost", "x").is_err());
    }
}
