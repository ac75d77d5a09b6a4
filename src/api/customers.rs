//! Customer records.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Customer, Interaction};

use super::decode;

pub async fn list(client: &ApiClient) -> ApiResult<Vec<Customer>> {
    decode(client.get("/api/customers").await?)
}

pub async fn get(client: &ApiClient, id: i64) -> ApiResult<Customer> {
    decode(client.get(&format!("/api/customers/{}", id)).await?)
}

pub async fn create(client: &ApiClient, customer: &Customer) -> ApiResult<Customer> {
    let body: Value = serde_json::to_value(customer).unwrap();
    decode(client.post("/api/customers", &body).await?)
}

pub async fn update(client: &ApiClient, id: i64, customer: &Customer) -> ApiResult<Customer> {
    let body: Value = serde_json::to_value(customer).unwrap();
    decode(client.put(&format!("/api/customers/{}", id), &body).await?)
}

pub async fn delete(client: &ApiClient, id: i64) -> ApiResult<()> {
    client.delete(&format!("/api/customers/{}", id)).await?;
    Ok(())
}

pub async fn search(client: &ApiClient, term: &str) -> ApiResult<Vec<Customer>> {
    decode(client.get(&format!("/api/customers/search?q={}", urlencoding::encode(term))).await?)
}

/// All interactions recorded against one customer.
pub async fn interactions(client: &ApiClient, id: i64) -> ApiResult<Vec<Interaction>> {
    decode(client.get(&format!("/api/customers/{}/interactions", id)).await?)
}
