//! Unified request-outcome error model.
//! This module provides the failure taxonomy produced by the request pipeline
//! (`client`) and consumed by every screen, along with classification helpers.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiError {
    /// Session invalid or expired. The pipeline has already cleared the store.
    Unauthorized { message: String },
    /// Authenticated but disallowed, after the diagnostic fallback ran (or was disabled).
    Forbidden { message: String },
    /// Transport-level failure; `origin` names the configured backend.
    Network { origin: String, message: String },
    /// Any other non-2xx response; message comes from the server body when available.
    Http { status: u16, message: String },
    /// Local form validation failure. Never produced by a network call.
    Input { field: String, message: String },
}

impl ApiError {
    pub fn unauthorized<S: Into<String>>(msg: S) -> Self { ApiError::Unauthorized { message: msg.into() } }
    pub fn forbidden<S: Into<String>>(msg: S) -> Self { ApiError::Forbidden { message: msg.into() } }
    pub fn network<S: Into<String>>(origin: S, msg: S) -> Self { ApiError::Network { origin: origin.into(), message: msg.into() } }
    pub fn http<S: Into<String>>(status: u16, msg: S) -> Self { ApiError::Http { status, message: msg.into() } }
    pub fn input<S: Into<String>>(field: S, msg: S) -> Self { ApiError::Input { field: field.into(), message: msg.into() } }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::Forbidden { message }
            | ApiError::Network { message, .. }
            | ApiError::Http { message, .. }
            | ApiError::Input { message, .. } => message.as_str(),
        }
    }

    /// The HTTP status this outcome corresponds to, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network { .. } | ApiError::Input { .. } => None,
        }
    }

    /// True when the failure should force the console back to the login screen.
    pub fn requires_login(&self) -> bool { matches!(self, ApiError::Unauthorized { .. }) }

    /// One-line text for inline display on a screen.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { .. } => "Unauthorized - Please login again".to_string(),
            ApiError::Forbidden { .. } => "Forbidden - You do not have permission to perform this action".to_string(),
            ApiError::Network { origin, .. } => format!(
                "Network error - Could not connect to backend at {}. Please check if your backend server is running.",
                origin
            ),
            ApiError::Http { status, message } => format!("HTTP {}: {}", status, message),
            ApiError::Input { message, .. } => message.clone(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized { message } => write!(f, "unauthorized: {}", message),
            ApiError::Forbidden { message } => write!(f, "forbidden: {}", message),
            ApiError::Network { origin, message } => write!(f, "network ({}): {}", origin, message),
            ApiError::Http { status, message } => write!(f, "http {}: {}", status, message),
            ApiError::Input { field, message } => write!(f, "input ({}): {}", field, message),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::unauthorized("no").status(), Some(401));
        assert_eq!(ApiError::forbidden("no").status(), Some(403));
        assert_eq!(ApiError::http(500, "boom").status(), Some(500));
        assert_eq!(ApiError::network("http://localhost:8080", "refused").status(), None);
        assert_eq!(ApiError::input("email", "Email is required").status(), None);
    }

    #[test]
    fn network_message_names_origin() {
        let e = ApiError::network("http://localhost:8080", "connection refused");
        assert!(e.user_message().contains("http://localhost:8080"));
    }

    #[test]
    fn only_unauthorized_forces_login() {
        assert!(ApiError::unauthorized("x").requires_login());
        assert!(!ApiError::forbidden("x").requires_login());
        assert!(!ApiError::http(404, "x").requires_login());
    }

    #[test]
    fn serialized_tag_is_snake_case() {
        let v = serde_json::to_value(ApiError::http(404, "missing")).unwrap();
        assert_eq!(v.get("type").and_then(|t| t.as_str()), Some("http"));
        assert_eq!(v.get("status").and_then(|s| s.as_u64()), Some(404));
    }
}
