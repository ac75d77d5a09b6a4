//! Analytics endpoints backing the analyst dashboard.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::ApiResult;

use super::decode;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total_customers: i64,
    #[serde(default)]
    pub customers_by_status: BTreeMap<String, i64>,
    #[serde(default)]
    pub customers_by_industry: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionStats {
    pub total_interactions: i64,
    #[serde(default)]
    pub interactions_by_type: BTreeMap<String, i64>,
    #[serde(default)]
    pub avg_interactions_per_customer: f64,
}

pub async fn customer_stats(client: &ApiClient) -> ApiResult<CustomerStats> {
    decode(client.get("/api/analytics/customer-stats").await?)
}

pub async fn interaction_stats(client: &ApiClient) -> ApiResult<InteractionStats> {
    decode(client.get("/api/analytics/interaction-stats").await?)
}

/// Month name -> count, all twelve months present.
pub async fn monthly_interactions(client: &ApiClient) -> ApiResult<BTreeMap<String, i64>> {
    decode(client.get("/api/analytics/monthly-interactions").await?)
}

pub async fn interaction_types(client: &ApiClient) -> ApiResult<BTreeMap<String, i64>> {
    decode(client.get("/api/analytics/interaction-types").await?)
}
