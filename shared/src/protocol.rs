use crate::{DashboardMetrics, Order, Rate, RateRecord};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// GET requests never carry a body.
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// The request value itself is the JSON body for methods that carry one.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the call needs `Authorization: Bearer <token>`.
    const REQUIRES_AUTH: bool = true;
    /// The URL path relative to the API base.
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub phone_number: String,
    pub otp: String,
}

/// `role` stays a raw string so an unknown value can be rejected by the
/// session layer instead of failing the whole decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }
}

// =========================================================
// Farmer orders
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// List the signed-in farmer's orders
#[derive(Debug, Serialize, Deserialize)]
pub struct ListMyOrdersRequest;

impl ApiRequest for ListMyOrdersRequest {
    type Response = OrdersResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/orders/my-orders".to_string()
    }
}

/// Only the raw land area is submitted; the server computes the quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub land_area: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order: Order,
}

impl ApiRequest for CreateOrderRequest {
    type Response = CreateOrderResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/orders".to_string()
    }
}

// =========================================================
// Admin
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminDashboardRequest;

impl ApiRequest for AdminDashboardRequest {
    type Response = DashboardMetrics;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/admin/dashboard".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListAllOrdersRequest;

impl ApiRequest for ListAllOrdersRequest {
    type Response = OrdersResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/admin/orders".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDecision {
    Approve,
    Decline,
}

impl ReviewDecision {
    pub fn as_path(&self) -> &'static str {
        match self {
            ReviewDecision::Approve => "approve",
            ReviewDecision::Decline => "decline",
        }
    }
}

/// Approve or decline a pending order. Both fields live in the path, so the
/// body serializes to `{}`.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOrderRequest {
    #[serde(skip)]
    pub id: u64,
    #[serde(skip)]
    pub decision: ReviewDecision,
}

impl ApiRequest for ReviewOrderRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/admin/orders/{}/{}", self.id, self.decision.as_path())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateResponse {
    #[serde(default)]
    pub rate: Option<Rate>,
}

impl RateResponse {
    /// A missing rate reads as zero, which disables the order preview.
    pub fn value_or_zero(&self) -> f64 {
        self.rate.as_ref().map(|r| r.value).unwrap_or(0.0)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentRateRequest;

impl ApiRequest for CurrentRateRequest {
    type Response = RateResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/admin/rate".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRateRequest {
    pub value: f64,
}

impl ApiRequest for UpdateRateRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/admin/rate".to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateHistoryResponse {
    #[serde(default)]
    pub history: Vec<RateRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RateHistoryRequest;

impl ApiRequest for RateHistoryRequest {
    type Response = RateHistoryResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/admin/rate-history".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_path_carries_id_and_action() {
        let req = ReviewOrderRequest {
            id: 42,
            decision: ReviewDecision::Decline,
        };
        assert_eq!(req.path(), "/admin/orders/42/decline");
        assert_eq!(serde_json::to_string(&req).unwrap(), "{}");
    }

    #[test]
    fn bodies_use_camel_case() {
        let login = LoginRequest {
            phone_number: "0788".into(),
            otp: "1234".into(),
        };
        assert_eq!(
            serde_json::to_string(&login).unwrap(),
            r#"{"phoneNumber":"0788","otp":"1234"}"#
        );
        let order = CreateOrderRequest { land_area: 10.0 };
        assert_eq!(
            serde_json::to_string(&order).unwrap(),
            r#"{"landArea":10.0}"#
        );
    }

    #[test]
    fn auth_endpoints_are_public() {
        assert!(!LoginRequest::REQUIRES_AUTH);
        assert!(!RegisterRequest::REQUIRES_AUTH);
        assert!(ListMyOrdersRequest::REQUIRES_AUTH);
        assert!(UpdateRateRequest::REQUIRES_AUTH);
    }

    #[test]
    fn missing_rate_reads_as_zero() {
        let empty: RateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.value_or_zero(), 0.0);
        let set: RateResponse = serde_json::from_str(r#"{"rate":{"value":"5"}}"#).unwrap();
        assert_eq!(set.value_or_zero(), 5.0);
    }
}
