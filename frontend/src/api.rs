//! FertiFlow REST 客户端
//!
//! `FertiflowApi` fixes the base URL at construction and sends typed
//! [`ApiRequest`]s through a pluggable [`Transport`]. The bearer token is
//! supplied per call from the session.

use async_trait::async_trait;
use fertiflow_shared::protocol::{
    AdminDashboardRequest, ApiRequest, CreateOrderRequest, CurrentRateRequest, HttpMethod,
    ListAllOrdersRequest, ListMyOrdersRequest, LoginRequest, LoginResponse, RateHistoryRequest,
    RegisterRequest, RegisterResponse, ReviewDecision, ReviewOrderRequest, UpdateRateRequest,
};
use fertiflow_shared::{
    DashboardMetrics, ErrorBody, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, Order, RateRecord,
};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::web::FetchTransport;

// =========================================================
// 传输层抽象 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 传输特性
///
/// `?Send` because browser futures hold JS handles. The transport value itself
/// is shared through the reactive context, hence `Send + Sync`.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// API 客户端
// =========================================================

#[derive(Clone)]
pub struct FertiflowApi {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl FertiflowApi {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    /// Client backed by the browser `fetch` API.
    pub fn browser(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone(), Arc::new(FetchTransport))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Sends one request. No retries: a failure is final for this attempt.
    pub async fn call<R: ApiRequest>(&self, request: &R, token: Option<&str>) -> ApiResult<R::Response> {
        let mut http = HttpRequest::new(R::METHOD, self.url(&request.path()));

        if R::REQUIRES_AUTH {
            let token = token
                .filter(|t| !t.is_empty())
                .ok_or(ApiError::MissingToken)?;
            http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        if R::METHOD.has_body() {
            let body =
                serde_json::to_string(request).map_err(|e| ApiError::Decode(e.to_string()))?;
            http = http
                .with_header(HEADER_CONTENT_TYPE, "application/json")
                .with_body(body);
        }

        log::debug!("[Api] {} {}", R::METHOD.as_str(), http.url);
        let response = self.transport.send(http).await?;

        if !response.ok() {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.message);
            return Err(ApiError::Status {
                status: response.status,
                message,
            });
        }

        // Some confirmations come back with an empty body.
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // --- Auth ---

    pub async fn login(&self, phone_number: String, otp: String) -> ApiResult<LoginResponse> {
        self.call(&LoginRequest { phone_number, otp }, None).await
    }

    pub async fn register(
        &self,
        full_name: String,
        phone_number: String,
    ) -> ApiResult<RegisterResponse> {
        self.call(
            &RegisterRequest {
                full_name,
                phone_number,
            },
            None,
        )
        .await
    }

    // --- Farmer ---

    pub async fn my_orders(&self, token: Option<&str>) -> ApiResult<Vec<Order>> {
        Ok(self.call(&ListMyOrdersRequest, token).await?.orders)
    }

    /// Returns the order as the server stored it, with its computed quantity.
    pub async fn create_order(&self, token: Option<&str>, land_area: f64) -> ApiResult<Order> {
        Ok(self
            .call(&CreateOrderRequest { land_area }, token)
            .await?
            .order)
    }

    // --- Admin ---

    pub async fn dashboard_metrics(&self, token: Option<&str>) -> ApiResult<DashboardMetrics> {
        self.call(&AdminDashboardRequest, token).await
    }

    pub async fn all_orders(&self, token: Option<&str>) -> ApiResult<Vec<Order>> {
        Ok(self.call(&ListAllOrdersRequest, token).await?.orders)
    }

    pub async fn review_order(
        &self,
        token: Option<&str>,
        id: u64,
        decision: ReviewDecision,
    ) -> ApiResult<()> {
        self.call(&ReviewOrderRequest { id, decision }, token)
            .await
            .map(|_| ())
    }

    /// Current rate; an unset rate reads as 0.
    pub async fn current_rate(&self, token: Option<&str>) -> ApiResult<f64> {
        Ok(self.call(&CurrentRateRequest, token).await?.value_or_zero())
    }

    pub async fn update_rate(&self, token: Option<&str>, value: f64) -> ApiResult<()> {
        self.call(&UpdateRateRequest { value }, token)
            .await
            .map(|_| ())
    }

    pub async fn rate_history(&self, token: Option<&str>) -> ApiResult<Vec<RateRecord>> {
        Ok(self.call(&RateHistoryRequest, token).await?.history)
    }
}

#[cfg(test)]
mod tests;
