//! Wire records for the CRM REST API. Field names follow the backend's JSON
//! (camelCase); dates are `yyyy-MM-dd`, interaction timestamps
//! `yyyy-MM-dd'T'HH:mm:ss`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::session::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Regular,
    Premium,
    Vip,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Regular => "REGULAR",
            CustomerType::Premium => "PREMIUM",
            CustomerType::Vip => "VIP",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "REGULAR" => Some(CustomerType::Regular),
            "PREMIUM" => Some(CustomerType::Premium),
            "VIP" => Some(CustomerType::Vip),
            _ => None,
        }
    }
}

impl std::fmt::Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.as_str()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionType {
    Purchase,
    Inquiry,
    Support,
    Complaint,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Purchase => "PURCHASE",
            InteractionType::Inquiry => "INQUIRY",
            InteractionType::Support => "SUPPORT",
            InteractionType::Complaint => "COMPLAINT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PURCHASE" => Some(InteractionType::Purchase),
            "INQUIRY" => Some(InteractionType::Inquiry),
            "SUPPORT" => Some(InteractionType::Support),
            "COMPLAINT" => Some(InteractionType::Complaint),
            _ => None,
        }
    }
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.as_str()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionStatus {
    Open,
    Closed,
    Pending,
}

impl InteractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionStatus::Open => "OPEN",
            InteractionStatus::Closed => "CLOSED",
            InteractionStatus::Pending => "PENDING",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(InteractionStatus::Open),
            "CLOSED" => Some(InteractionStatus::Closed),
            "PENDING" => Some(InteractionStatus::Pending),
            _ => None,
        }
    }
}

impl std::fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.as_str()) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub customer_type: CustomerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub customer_id: i64,
    pub interaction_type: InteractionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: InteractionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_date: Option<NaiveDateTime>,
}

/// A backend login account, as listed on the user-management screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// Login response. The backend has shipped two shapes (flat fields and a
/// nested `user` object); both are accepted, with the same fallbacks the
/// console always applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Option<String>,
    pub role: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<i64>,
    pub user: Option<LoginUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub username: Option<String>,
    pub role: Option<String>,
}

impl LoginResponse {
    /// Role from the nested user, then the flat field, then USER.
    pub fn resolved_role(&self) -> Role {
        let s = self
            .user
            .as_ref()
            .and_then(|u| u.role.clone())
            .or_else(|| self.role.clone())
            .unwrap_or_else(|| "USER".to_string());
        Role::parse(&s)
    }

    /// Username from the nested user, then the flat field, then what was typed.
    pub fn resolved_username(&self, typed: &str) -> String {
        self.user
            .as_ref()
            .and_then(|u| u.username.clone())
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| typed.to_string())
    }
}
