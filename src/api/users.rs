//! Backend account management. Every operation is admin-gated server-side;
//! the console additionally guards the screens that call these.

use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::Account;
use crate::session::Role;

use super::decode;

pub async fn list(client: &ApiClient) -> ApiResult<Vec<Account>> {
    decode(client.get("/api/users").await?)
}

pub async fn get(client: &ApiClient, id: i64) -> ApiResult<Account> {
    decode(client.get(&format!("/api/users/{}", id)).await?)
}

pub async fn update(client: &ApiClient, id: i64, username: &str, role: Role) -> ApiResult<Account> {
    let body = json!({"username": username, "role": role.as_str()});
    decode(client.put(&format!("/api/users/{}", id), &body).await?)
}

pub async fn delete(client: &ApiClient, id: i64) -> ApiResult<()> {
    client.delete(&format!("/api/users/{}", id)).await?;
    Ok(())
}
