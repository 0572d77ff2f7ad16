//! In-process backend used by unit tests.

use async_trait::async_trait;
use fertiflow_shared::protocol::{CreateOrderRequest, HttpMethod, UpdateRateRequest};
use fertiflow_shared::{DashboardMetrics, FarmerRef, Order, OrderStatus, Rate};
use serde_json::json;
use std::sync::{Arc, Mutex};

use crate::api::{FertiflowApi, HttpRequest, HttpResponse, Transport};
use crate::error::{ApiError, ApiResult};

pub const TEST_BASE: &str = "http://api.test/api";
pub const FARMER_TOKEN: &str = "farmer-token";
pub const ADMIN_TOKEN: &str = "admin-token";

#[derive(Default)]
struct BackendState {
    orders: Vec<Order>,
    rate: Option<f64>,
    history: Vec<Rate>,
    requests: Vec<HttpRequest>,
}

/// Mimics the REST backend closely enough for client round-trips.
#[derive(Default)]
pub struct StubBackend {
    state: Mutex<BackendState>,
}

impl StubBackend {
    pub fn with_rate(rate: f64) -> Arc<Self> {
        let backend = Self::default();
        if let Ok(mut state) = backend.state.lock() {
            state.rate = Some(rate);
        }
        Arc::new(backend)
    }

    pub fn api(self: &Arc<Self>) -> FertiflowApi {
        FertiflowApi::new(TEST_BASE, self.clone())
    }

    pub fn seed_order(&self, id: u64, farmer: &str, land_area: f64, status: OrderStatus) {
        let mut state = self.state.lock().unwrap();
        let rate = state.rate.unwrap_or(0.0);
        state.orders.push(Order {
            id,
            farmer: Some(FarmerRef {
                full_name: Some(farmer.to_string()),
            }),
            land_area,
            fertilizer_qty: land_area * rate,
            status,
            created_at: None,
        });
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }

    pub fn order_status(&self, id: u64) -> Option<OrderStatus> {
        let state = self.state.lock().unwrap();
        state.orders.iter().find(|o| o.id == id).map(|o| o.status)
    }

    fn route(&self, req: &HttpRequest) -> (u16, serde_json::Value) {
        let Some(path) = req.url.strip_prefix(TEST_BASE) else {
            return (404, json!({ "message": "unknown host" }));
        };
        let bearer = req
            .header("Authorization")
            .and_then(|h| h.strip_prefix("Bearer "));
        let mut state = self.state.lock().unwrap();

        match (req.method, path) {
            (HttpMethod::Post, "/auth/login") => {
                let body: serde_json::Value =
                    serde_json::from_str(req.body.as_deref().unwrap_or("{}")).unwrap();
                match body["otp"].as_str() {
                    Some("1234") => (
                        200,
                        json!({ "token": FARMER_TOKEN, "role": "FARMER", "fullName": "Amina" }),
                    ),
                    Some("9999") => (200, json!({ "token": ADMIN_TOKEN, "role": "ADMIN" })),
                    _ => (401, json!({ "message": "Invalid OTP" })),
                }
            }
            (HttpMethod::Post, "/auth/register") => {
                (201, json!({ "message": "Registration successful" }))
            }
            _ if bearer.is_none() => (401, json!({ "message": "Unauthorized" })),
            (HttpMethod::Get, "/orders/my-orders") => (200, json!({ "orders": state.orders })),
            (HttpMethod::Post, "/orders") => {
                let body: CreateOrderRequest =
                    serde_json::from_str(req.body.as_deref().unwrap_or("{}")).unwrap();
                let Some(rate) = state.rate else {
                    return (400, json!({ "message": "No rate configured" }));
                };
                let order = Order {
                    id: state.orders.len() as u64 + 1,
                    farmer: Some(FarmerRef {
                        full_name: Some("Amina".into()),
                    }),
                    land_area: body.land_area,
                    fertilizer_qty: body.land_area * rate,
                    status: OrderStatus::Pending,
                    created_at: None,
                };
                state.orders.push(order.clone());
                (201, json!({ "order": order }))
            }
            (HttpMethod::Get, "/admin/dashboard") => {
                let count = |s: OrderStatus| state.orders.iter().filter(|o| o.status == s).count();
                let metrics = DashboardMetrics {
                    approved: count(OrderStatus::Approved) as u64,
                    declined: count(OrderStatus::Declined) as u64,
                    pending: count(OrderStatus::Pending) as u64,
                };
                (200, json!(metrics))
            }
            (HttpMethod::Get, "/admin/orders") => (200, json!({ "orders": state.orders })),
            (HttpMethod::Get, "/admin/rate") => match state.rate {
                Some(value) => (200, json!({ "rate": { "value": value.to_string() } })),
                None => (200, json!({ "rate": null })),
            },
            (HttpMethod::Post, "/admin/rate") => {
                let body: UpdateRateRequest =
                    serde_json::from_str(req.body.as_deref().unwrap_or("{}")).unwrap();
                state.rate = Some(body.value);
                state.history.insert(
                    0,
                    Rate {
                        value: body.value,
                        created_at: None,
                    },
                );
                (200, json!({ "message": "Rate updated" }))
            }
            (HttpMethod::Get, "/admin/rate-history") => (200, json!({ "history": state.history })),
            (HttpMethod::Patch, path) if path.starts_with("/admin/orders/") => {
                let mut parts = path.trim_start_matches("/admin/orders/").split('/');
                let id = parts.next().and_then(|id| id.parse::<u64>().ok());
                let status = match parts.next() {
                    Some("approve") => Some(OrderStatus::Approved),
                    Some("decline") => Some(OrderStatus::Declined),
                    _ => None,
                };
                let order = id.and_then(|id| state.orders.iter_mut().find(|o| o.id == id));
                match (order, status) {
                    (Some(order), Some(_)) if !order.is_pending() => {
                        (409, json!({ "message": "Order already reviewed" }))
                    }
                    (Some(order), Some(status)) => {
                        order.status = status;
                        (200, json!({}))
                    }
                    _ => (404, json!({ "message": "Order not found" })),
                }
            }
            _ => (404, json!({ "message": "Not found" })),
        }
    }
}

#[async_trait(?Send)]
impl Transport for StubBackend {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let (status, body) = self.route(&req);
        self.state.lock().unwrap().requests.push(req);
        Ok(HttpResponse {
            status,
            body: body.to_string(),
        })
    }
}

/// Transport that never reaches a server.
pub struct OfflineTransport;

#[async_trait(?Send)]
impl Transport for OfflineTransport {
    async fn send(&self, _req: HttpRequest) -> ApiResult<HttpResponse> {
        Err(ApiError::Network("connection refused".into()))
    }
}

/// Transport that answers every call with a fixed status and body.
pub struct FixedResponse {
    pub status: u16,
    pub body: &'static str,
}

#[async_trait(?Send)]
impl Transport for FixedResponse {
    async fn send(&self, _req: HttpRequest) -> ApiResult<HttpResponse> {
        Ok(HttpResponse {
            status: self.status,
            body: self.body.to_string(),
        })
    }
}

pub fn offline_api() -> FertiflowApi {
    FertiflowApi::new(TEST_BASE, Arc::new(OfflineTransport))
}

pub fn fixed_api(status: u16, body: &'static str) -> FertiflowApi {
    FertiflowApi::new(TEST_BASE, Arc::new(FixedResponse { status, body }))
}
