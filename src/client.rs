//! HTTP request pipeline for the CRM backend.
//!
//! Builds each outgoing request, attaches the bearer credential from the
//! session store, and interprets status codes into the `ApiError` taxonomy.
//! Two behaviors are load-bearing and deliberate:
//!
//! - a 401 clears the session store before `Unauthorized` is returned, so
//!   every subsequently-issued request starts unauthenticated;
//! - a 403 is retried exactly once with the credential header stripped. A
//!   retry that succeeds is surfaced as success, which exposes a backend
//!   that authorizes anonymous traffic it should reject. The fallback can be
//!   disabled per client (`CLIENTELE_NO_AUTH_RETRY` / `with_forbidden_fallback`).
//!
//! No timeout is enforced here beyond the transport default, and no retry
//! happens beyond the single 403 fallback.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;

/// Tokens issued by mock login. The pipeline never attaches them as
/// credentials.
pub const MOCK_TOKEN_PREFIX: &str = "mock_token_";

#[derive(Clone)]
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
    store: SessionStore,
    forbidden_fallback: bool,
}

impl ApiClient {
    pub fn new(config: &Config, store: SessionStore) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base: config.api_url.clone(),
            http,
            store,
            forbidden_fallback: config.forbidden_fallback,
        })
    }

    pub fn with_forbidden_fallback(mut self, enabled: bool) -> Self {
        self.forbidden_fallback = enabled;
        self
    }

    /// The configured backend origin, as named in Network errors.
    pub fn origin(&self) -> &str { &self.base }

    pub fn store(&self) -> &SessionStore { &self.store }

    /// Issue one request and classify the outcome. `path` is joined onto the
    /// configured origin; caller headers override the JSON default on
    /// conflict.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> ApiResult<Value> {
        let session = self.store.get();
        // Mock tokens are display-only; never present them as credentials.
        let bearer = session
            .token
            .as_deref()
            .filter(|t| !t.starts_with(MOCK_TOKEN_PREFIX))
            .map(|t| t.to_string());
        debug!(
            target: "clientele::client",
            "{} {} auth={} user={:?}",
            method, path, bearer.is_some(), session.username
        );

        let resp = self.dispatch(&method, path, body, headers, bearer.as_deref()).await?;
        let status = resp.status();

        if status.as_u16() == 401 {
            // Session invalid or expired: drop it so later requests start
            // clean, then report. Already-in-flight requests are unaffected.
            if let Err(e) = self.store.clear() {
                warn!(target: "clientele::client", "failed to clear session after 401: {}", e);
            }
            debug!(target: "clientele::client", "401 on {} {}, session cleared", method, path);
            return Err(ApiError::unauthorized("Unauthorized - Please login again"));
        }

        if status.as_u16() == 403 {
            if self.forbidden_fallback {
                debug!(target: "clientele::client", "403 on {} {}, retrying without credential header", method, path);
                let retry = self.dispatch(&method, path, body, headers, None).await?;
                if retry.status().is_success() {
                    warn!(
                        target: "clientele::client",
                        "{} {} succeeded without credentials; backend authorization looks misconfigured",
                        method, path
                    );
                    return parse_success(retry).await;
                }
            }
            return Err(ApiError::forbidden(
                "Forbidden - You do not have permission to perform this action",
            ));
        }

        if !status.is_success() {
            let fallback = status
                .canonical_reason()
                .map(|r| r.to_string())
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            let message = match resp.json::<Value>().await {
                Ok(v) => v
                    .get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(|m| m.to_string())
                    .unwrap_or(fallback),
                Err(_) => fallback,
            };
            return Err(ApiError::http(status.as_u16(), message));
        }

        parse_success(resp).await
    }

    /// Build and fire one HTTP call. Transport failures are reclassified as
    /// Network naming the configured origin.
    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
        bearer: Option<&str>,
    ) -> ApiResult<Response> {
        let url = format!("{}{}", self.base, path);
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(extra) = headers {
            for (name, value) in extra.iter() {
                h.insert(name.clone(), value.clone());
            }
        }
        if let Some(token) = bearer {
            let v = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::http(0, format!("invalid bearer token: {}", e)))?;
            h.insert(AUTHORIZATION, v);
        }
        let mut req = self.http.request(method.clone(), &url).headers(h);
        if let Some(b) = body {
            req = req.json(b);
        }
        req.send()
            .await
            .map_err(|e| ApiError::network(self.base.clone(), e.to_string()))
    }

    pub async fn get(&self, path: &str) -> ApiResult<Value> {
        self.send(Method::GET, path, None, None).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.send(Method::DELETE, path, None, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> ApiResult<Value> {
        self.send(Method::POST, path, Some(body), None).await
    }

    /// POST with no body (logout and friends).
    pub async fn post_empty(&self, path: &str) -> ApiResult<Value> {
        self.send(Method::POST, path, None, None).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> ApiResult<Value> {
        self.send(Method::PUT, path, Some(body), None).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> ApiResult<Value> {
        self.send(Method::PATCH, path, Some(body), None).await
    }
}

/// 2xx handling: a JSON content-type parses to the payload, anything else is
/// an empty success object.
async fn parse_success(resp: Response) -> ApiResult<Value> {
    let status = resp.status().as_u16();
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("application/json"))
        .unwrap_or(false);
    if !is_json {
        return Ok(json!({}));
    }
    resp.json::<Value>()
        .await
        .map_err(|e| ApiError::http(status, format!("invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_tokens_are_recognized() {
        assert!("mock_token_123".starts_with(MOCK_TOKEN_PREFIX));
        assert!(!"eyJhbGciOi".starts_with(MOCK_TOKEN_PREFIX));
    }
}
