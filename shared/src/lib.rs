use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod calc;
pub mod date;
mod number;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// Account role as issued by the backend at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Farmer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Farmer => "FARMER",
        }
    }

    /// Parses the wire/storage form. Anything other than the two known
    /// spellings is treated as "no role".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "FARMER" => Some(Role::Farmer),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Farmer => "Farmer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Approved,
    Declined,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Declined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Declined => "DECLINED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Approved => "Approved",
            OrderStatus::Declined => "Declined",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerRef {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A farmer's land-area submission and the allocation the server computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub farmer: Option<FarmerRef>,
    #[serde(deserialize_with = "number::f64_or_string")]
    pub land_area: f64,
    #[serde(deserialize_with = "number::f64_or_string")]
    pub fertilizer_qty: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn farmer_name(&self) -> Option<&str> {
        self.farmer.as_ref()?.full_name.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }
}

/// Bags-per-hectare conversion factor. History entries share the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    #[serde(deserialize_with = "number::f64_or_string")]
    pub value: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

pub type RateRecord = Rate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default)]
    pub approved: u64,
    #[serde(default)]
    pub declined: u64,
    #[serde(default)]
    pub pending: u64,
}

impl DashboardMetrics {
    pub fn total(&self) -> u64 {
        self.approved + self.declined + self.pending
    }
}

/// Error payload returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_exact() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("FARMER"), Some(Role::Farmer));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn order_accepts_decimal_strings() {
        let json = r#"{
            "id": 7,
            "farmer": { "fullName": "Amina" },
            "landArea": "2.50",
            "fertilizerQty": 12.5,
            "status": "APPROVED",
            "createdAt": "2025-01-05T10:00:00.000Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.land_area, 2.5);
        assert_eq!(order.fertilizer_qty, 12.5);
        assert_eq!(order.farmer_name(), Some("Amina"));
        assert_eq!(order.status, OrderStatus::Approved);
        assert!(order.created_at.is_some());
    }

    #[test]
    fn order_without_farmer_or_date() {
        let json = r#"{"id":1,"landArea":10,"fertilizerQty":50,"status":"PENDING"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.farmer_name(), None);
        assert!(order.created_at.is_none());
        assert!(order.is_pending());
    }

    #[test]
    fn metrics_default_missing_counters() {
        let metrics: DashboardMetrics = serde_json::from_str(r#"{"approved":3}"#).unwrap();
        assert_eq!(metrics.pending, 0);
        assert_eq!(metrics.total(), 3);
    }
}
