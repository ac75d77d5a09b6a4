//! Runtime configuration resolved once from the environment.
//! The backend origin is fixed per build with an env override; state lives in
//! a per-user folder unless redirected.

use std::path::PathBuf;

/// Default backend origin when CLIENTELE_API_URL is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin all requests are issued against.
    pub api_url: String,
    /// Folder holding the persisted session state file.
    pub state_dir: PathBuf,
    /// When true, login resolves against the built-in demo user table.
    pub use_mock: bool,
    /// When false, a 403 fails immediately instead of running the
    /// credential-stripped diagnostic retry.
    pub forbidden_fallback: bool,
}

impl Config {
    /// Resolve configuration from the environment.
    pub fn from_env() -> Self {
        let api_url = std::env::var("CLIENTELE_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        // Trailing slashes break Url::join path concatenation
        let api_url = api_url.trim_end_matches('/').to_string();
        let state_dir = std::env::var("CLIENTELE_STATE_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_state_dir);
        let use_mock = env_flag("CLIENTELE_USE_MOCK");
        let forbidden_fallback = !env_flag("CLIENTELE_NO_AUTH_RETRY");
        Self { api_url, state_dir, use_mock, forbidden_fallback }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1").unwrap_or(false)
}

fn default_state_dir() -> PathBuf {
    let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")).ok();
    match home {
        Some(h) if !h.is_empty() => PathBuf::from(h).join(".clientele"),
        _ => PathBuf::from(".clientele"),
    }
}
