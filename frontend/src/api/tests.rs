use super::*;
use crate::testing::{ADMIN_TOKEN, FARMER_TOKEN, StubBackend, TEST_BASE, fixed_api, offline_api};
use fertiflow_shared::OrderStatus;

#[tokio::test]
async fn created_order_shows_up_in_my_orders() {
    let backend = StubBackend::with_rate(5.0);
    let api = backend.api();

    let order = api.create_order(Some(FARMER_TOKEN), 10.0).await.unwrap();
    assert_eq!(order.fertilizer_qty, 50.0);
    assert_eq!(order.status, OrderStatus::Pending);

    let orders = api.my_orders(Some(FARMER_TOKEN)).await.unwrap();
    assert!(orders.iter().any(|o| o.id == order.id && o.land_area == 10.0));
}

#[tokio::test]
async fn authenticated_calls_carry_bearer_token() {
    let backend = StubBackend::with_rate(5.0);
    let api = backend.api();

    api.all_orders(Some(ADMIN_TOKEN)).await.unwrap();

    let req = backend.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.url, format!("{TEST_BASE}/admin/orders"));
    assert_eq!(req.header("authorization"), Some("Bearer admin-token"));
    assert_eq!(req.body, None);
}

#[tokio::test]
async fn missing_token_sends_nothing() {
    let backend = StubBackend::with_rate(5.0);
    let api = backend.api();

    assert_eq!(api.my_orders(None).await, Err(ApiError::MissingToken));
    assert_eq!(api.my_orders(Some("")).await, Err(ApiError::MissingToken));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn login_is_public_and_posts_json() {
    let backend = StubBackend::with_rate(5.0);
    let api = backend.api();

    let login = api.login("0788000000".into(), "1234".into()).await.unwrap();
    assert_eq!(login.role, "FARMER");
    assert_eq!(login.full_name.as_deref(), Some("Amina"));

    let req = backend.last_request().unwrap();
    assert_eq!(req.header("Authorization"), None);
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(
        req.body.as_deref(),
        Some(r#"{"phoneNumber":"0788000000","otp":"1234"}"#)
    );
}

#[tokio::test]
async fn rejected_login_surfaces_server_message() {
    let api = StubBackend::with_rate(5.0).api();

    let err = api.login("0788".into(), "0000".into()).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.user_message("Login failed"), "Invalid OTP");
}

#[tokio::test]
async fn review_patches_order_and_second_review_conflicts() {
    let backend = StubBackend::with_rate(5.0);
    backend.seed_order(1, "Amina", 2.0, OrderStatus::Pending);
    let api = backend.api();

    api.review_order(Some(ADMIN_TOKEN), 1, ReviewDecision::Approve)
        .await
        .unwrap();
    let req = backend.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Patch);
    assert_eq!(req.url, format!("{TEST_BASE}/admin/orders/1/approve"));
    assert_eq!(req.body.as_deref(), Some("{}"));
    assert_eq!(backend.order_status(1), Some(OrderStatus::Approved));

    let err = api
        .review_order(Some(ADMIN_TOKEN), 1, ReviewDecision::Decline)
        .await
        .unwrap_err();
    assert_eq!(err.user_message("Failed"), "Order already reviewed");
    assert_eq!(backend.order_status(1), Some(OrderStatus::Approved));
}

#[tokio::test]
async fn rate_update_lands_in_history() {
    let backend = StubBackend::default();
    let backend = std::sync::Arc::new(backend);
    let api = backend.api();

    assert_eq!(api.current_rate(Some(ADMIN_TOKEN)).await.unwrap(), 0.0);

    api.update_rate(Some(ADMIN_TOKEN), 7.5).await.unwrap();

    assert_eq!(api.current_rate(Some(ADMIN_TOKEN)).await.unwrap(), 7.5);
    let history = api.rate_history(Some(ADMIN_TOKEN)).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].value, 7.5);
}

#[tokio::test]
async fn dashboard_counts_by_status() {
    let backend = StubBackend::with_rate(5.0);
    backend.seed_order(1, "A", 1.0, OrderStatus::Pending);
    backend.seed_order(2, "B", 1.0, OrderStatus::Approved);
    backend.seed_order(3, "C", 1.0, OrderStatus::Approved);

    let metrics = backend
        .api()
        .dashboard_metrics(Some(ADMIN_TOKEN))
        .await
        .unwrap();
    assert_eq!(metrics.approved, 2);
    assert_eq!(metrics.pending, 1);
    assert_eq!(metrics.total(), 3);
}

#[tokio::test]
async fn empty_success_body_is_accepted() {
    let api = fixed_api(204, "");
    api.update_rate(Some(ADMIN_TOKEN), 3.0).await.unwrap();
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let api = fixed_api(200, "<html>gateway</html>");
    let err = api.my_orders(Some(FARMER_TOKEN)).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn error_without_json_body_has_no_message() {
    let api = fixed_api(502, "Bad Gateway");
    let err = api.all_orders(Some(ADMIN_TOKEN)).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 502,
            message: None
        }
    );
}

#[tokio::test]
async fn network_failure_is_not_retried() {
    let api = offline_api();
    let err = api.current_rate(Some(ADMIN_TOKEN)).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[test]
fn base_url_is_normalized() {
    let api = fixed_api(200, "{}");
    assert_eq!(api.base_url(), TEST_BASE);
    assert_eq!(api.url("/orders"), format!("{TEST_BASE}/orders"));
    assert_eq!(api.url("orders"), format!("{TEST_BASE}/orders"));
}
