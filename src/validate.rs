//! Local form validation. Runs before any network call; failures surface as
//! `ApiError::Input` and never reach the request pipeline.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ApiError, ApiResult};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

/// A required field: present and non-blank. Returns the trimmed value.
pub fn required(field: &str, label: &str, value: Option<&str>) -> ApiResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::input(field.to_string(), format!("{} is required", label))),
    }
}

pub fn email_format(value: &str) -> ApiResult<()> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ApiError::input("email", "Invalid email format"))
    }
}

/// Login form: both fields, one combined message like the original screen.
pub fn login_form(username: &str, password: &str) -> ApiResult<()> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(ApiError::input("form", "Please fill in all fields"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank() {
        assert!(required("firstName", "First name", None).is_err());
        assert!(required("firstName", "First name", Some("   ")).is_err());
        assert_eq!(required("firstName", "First name", Some(" Jane ")).unwrap(), "Jane");
    }

    #[test]
    fn required_message_names_the_label() {
        let e = required("customerType", "Customer type", None).unwrap_err();
        assert_eq!(e.message(), "Customer type is required");
    }

    #[test]
    fn email_shapes() {
        assert!(email_format("a@b.co").is_ok());
        assert!(email_format("jane.doe@corp.example").is_ok());
        assert!(email_format("nope").is_err());
        assert!(email_format("a@b").is_err());
        assert!(email_format("a b@c.d").is_err());
    }

    #[test]
    fn login_form_needs_both() {
        assert!(login_form("", "pw").is_err());
        assert!(login_form("user", "").is_err());
        assert!(login_form("user", "pw").is_ok());
    }
}
