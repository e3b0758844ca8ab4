use std::{collections::HashMap, net::SocketAddr};

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use fractic_iap_bridge::{
    config::ReceiptValidationConfig,
    domain::entities::{
        android_receipt_request::AndroidReceiptRequest, apple_receipt_status::AppleReceiptStatus,
        platform::Platform,
    },
    errors::IapError,
    util::{IapUtil, NativeModules},
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn verify_receipt(
    environment: &'static str,
    headers: HeaderMap,
    body: Value,
) -> Json<Value> {
    Json(json!({
        "status": 0,
        "environment": environment,
        "contentType": headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        "accept": headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()),
        "received": body,
    }))
}

async fn google_purchase(
    Path((package_name, purchase_type, product_id, token)): Path<(
        String,
        String,
        String,
        String,
    )>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    if query.get("access_token").map(String::as_str) != Some("valid-token") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    if token == "unknown" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "kind": format!("androidpublisher#{purchase_type}"),
        "packageName": package_name,
        "productId": product_id,
        "purchaseState": 0,
    })))
}

async fn spawn_store_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/sandbox/verifyReceipt",
            post(|headers: HeaderMap, Json(body): Json<Value>| {
                verify_receipt("Sandbox", headers, body)
            }),
        )
        .route(
            "/production/verifyReceipt",
            post(|headers: HeaderMap, Json(body): Json<Value>| {
                verify_receipt("Production", headers, body)
            }),
        )
        .route(
            "/unavailable/verifyReceipt",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route("/garbled/verifyReceipt", post(|| async { "<html></html>" }))
        .route(
            "/nonstandard/verifyReceipt",
            post(|| async { StatusCode::from_u16(599).unwrap() }),
        )
        .route(
            "/applications/{package_name}/purchases/{purchase_type}/{product_id}/tokens/{token}",
            get(google_purchase),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn util_for(addr: SocketAddr, production_path: &str) -> IapUtil {
    IapUtil::new(
        NativeModules::default(),
        Platform::Unsupported,
        ReceiptValidationConfig {
            apple_production_url: format!("http://{addr}/{production_path}/verifyReceipt"),
            apple_sandbox_url: format!("http://{addr}/sandbox/verifyReceipt"),
            google_play_base_url: format!("http://{addr}/applications"),
        },
    )
}

fn android_request(
    purchase_token: &str,
    access_token: &str,
    is_subscription: bool,
) -> AndroidReceiptRequest {
    AndroidReceiptRequest {
        package_name: "com.example.app".to_string(),
        product_id: "premium".to_string(),
        purchase_token: purchase_token.to_string(),
        access_token: access_token.to_string(),
        is_subscription,
    }
}

#[tokio::test]
async fn ios_test_receipts_go_to_sandbox() {
    let addr = spawn_store_server().await;
    let util = util_for(addr, "production");
    let body = json!({ "receipt-data": "MIIT...", "password": "shared-secret" });

    let response = util.validate_receipt_ios(&body, true).await.unwrap();

    assert_eq!(response["environment"], "Sandbox");
    assert_eq!(response["received"], body);
    assert_eq!(response["contentType"], "application/json");
    assert_eq!(response["accept"], "application/json");
    assert_eq!(
        AppleReceiptStatus::from_response(&response),
        Some(AppleReceiptStatus::Valid)
    );
}

#[tokio::test]
async fn ios_live_receipts_go_to_production() {
    let addr = spawn_store_server().await;
    let util = util_for(addr, "production");
    let body = json!({ "receipt-data": "MIIT..." });

    let response = util.validate_receipt_ios(&body, false).await.unwrap();

    assert_eq!(response["environment"], "Production");
    assert_eq!(response["received"], body);
}

#[tokio::test]
async fn ios_non_success_status_carries_status_code() {
    let addr = spawn_store_server().await;
    let util = util_for(addr, "unavailable");

    let err = util
        .validate_receipt_ios(&json!({ "receipt-data": "MIIT..." }), false)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert_eq!(err.to_string(), "Service Unavailable");
}

#[tokio::test]
async fn unnamed_status_falls_back_to_its_code() {
    let addr = spawn_store_server().await;
    let util = util_for(addr, "nonstandard");

    let err = util
        .validate_receipt_ios(&json!({ "receipt-data": "MIIT..." }), false)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(599));
    assert_eq!(err.to_string(), "599");
}

#[tokio::test]
async fn ios_non_json_body_is_rejected() {
    let addr = spawn_store_server().await;
    let util = util_for(addr, "garbled");

    let err = util
        .validate_receipt_ios(&json!({ "receipt-data": "MIIT..." }), false)
        .await
        .unwrap_err();

    assert!(matches!(err, IapError::InvalidResponse(_)));
}

#[tokio::test]
async fn android_subscription_lookup() {
    let addr = spawn_store_server().await;
    let util = util_for(addr, "production");

    let response = util
        .validate_receipt_android(&android_request("tok-1", "valid-token", true))
        .await
        .unwrap();

    assert_eq!(response["kind"], "androidpublisher#subscriptions");
    assert_eq!(response["packageName"], "com.example.app");
    assert_eq!(response["productId"], "premium");
}

#[tokio::test]
async fn android_product_lookup() {
    let addr = spawn_store_server().await;
    let util = util_for(addr, "production");

    let response = util
        .validate_receipt_android(&android_request("tok-1", "valid-token", false))
        .await
        .unwrap();

    assert_eq!(response["kind"], "androidpublisher#products");
}

#[tokio::test]
async fn android_failures_carry_status_code() {
    let addr = spawn_store_server().await;
    let util = util_for(addr, "production");

    let unauthorized = util
        .validate_receipt_android(&android_request("tok-1", "expired", false))
        .await
        .unwrap_err();
    let not_found = util
        .validate_receipt_android(&android_request("unknown", "valid-token", false))
        .await
        .unwrap_err();

    assert_eq!(unauthorized.status_code(), Some(401));
    assert_eq!(unauthorized.to_string(), "Unauthorized");
    assert_eq!(not_found.status_code(), Some(404));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let util = util_for(addr, "production");

    let err = util
        .validate_receipt_ios(&json!({ "receipt-data": "MIIT..." }), false)
        .await
        .unwrap_err();

    assert!(matches!(err, IapError::Network(_)));
    assert_eq!(err.status_code(), None);
}
