//! Interaction records. Update and delete address /api/interactions/{id}
//! directly, not the customer-scoped path.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::Interaction;

use super::decode;

pub async fn get(client: &ApiClient, id: i64) -> ApiResult<Interaction> {
    decode(client.get(&format!("/api/interactions/{}", id)).await?)
}

pub async fn create(client: &ApiClient, interaction: &Interaction) -> ApiResult<Interaction> {
    let body: Value = serde_json::to_value(interaction).unwrap();
    decode(client.post("/api/interactions", &body).await?)
}

pub async fn update(client: &ApiClient, id: i64, interaction: &Interaction) -> ApiResult<Interaction> {
    let body: Value = serde_json::to_value(interaction).unwrap();
    decode(client.put(&format!("/api/interactions/{}", id), &body).await?)
}

pub async fn delete(client: &ApiClient, id: i64) -> ApiResult<()> {
    client.delete(&format!("/api/interactions/{}", id)).await?;
    Ok(())
}

/// Interaction totals by status bucket.
pub async fn counts(client: &ApiClient) -> ApiResult<BTreeMap<String, i64>> {
    decode(client.get("/api/interactions/count").await?)
}
