//! Typed wrappers over the request pipeline, one module per backend
//! controller. These are thin: build the path, delegate to `ApiClient`,
//! decode the JSON payload.

pub mod analytics;
pub mod auth;
pub mod customers;
pub mod interactions;
pub mod users;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Decode a success payload into a typed record. A shape mismatch is a
/// server-contract failure, reported with the status the payload arrived
/// under.
pub(crate) fn decode<T: DeserializeOwned>(v: Value) -> ApiResult<T> {
    serde_json::from_value(v).map_err(|e| ApiError::http(200, format!("unexpected response shape: {}", e)))
}
