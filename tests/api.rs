//! End-to-end tests against the full router: in-memory SQLite, and a quote
//! endpoint pointed at an unreachable address so every lookup exercises the
//! 0.0 fallback path.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use coinfolio::{build_router, db, quotes::QuoteClient, state::build_state};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

async fn test_app() -> Router {
    let pool = db::init_pool("sqlite::memory:").await.unwrap();
    let quotes = QuoteClient::new("http://127.0.0.1:9", Duration::from_millis(250)).unwrap();
    build_router(build_state(pool, quotes))
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn submitted_transaction_appears_in_listing() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(form_post("/add_transaction", "symbol=eth&amount=2&price=100"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    // Symbol is uppercased on insert.
    assert!(html.contains("<td>ETH</td>"), "listing should show the new row");
    assert!(html.contains("2.0000"), "listing should show the amount");
}

#[tokio::test]
async fn quote_failure_renders_zero_live_price() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_post("/add_transaction", "symbol=BTC&amount=1&price=50000"))
        .await
        .unwrap();

    let response = app.oneshot(get("/")).await.unwrap();
    let html = String::from_utf8(body_bytes(response).await).unwrap();

    // Unreachable quote API → live price 0.00 → the whole cost basis is a loss.
    assert!(html.contains("0.00"), "live price column should fall back to 0.00");
    assert!(html.contains("-50000.00"), "PnL should be the negated cost basis");
}

#[tokio::test]
async fn deleted_transaction_disappears_from_listing() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_post("/add_transaction", "symbol=sol&amount=10&price=150"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_post("/delete_transaction/1", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.oneshot(get("/")).await.unwrap();
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!html.contains("<td>SOL</td>"), "deleted row should be gone");
    assert!(html.contains("No transactions yet"));
}

#[tokio::test]
async fn deleting_absent_id_is_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(form_post("/delete_transaction/42", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn malformed_numeric_input_is_rejected() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(form_post("/add_transaction", "symbol=BTC&amount=abc&price=1"))
        .await
        .unwrap();
    assert!(
        response.status().is_client_error(),
        "non-numeric amount should be rejected, got {}",
        response.status()
    );

    // Nothing was stored.
    let response = app.oneshot(get("/")).await.unwrap();
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("No transactions yet"));
}

#[tokio::test]
async fn allocation_chart_returns_png() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_post("/add_transaction", "symbol=BTC&amount=0.5&price=60000"))
        .await
        .unwrap();

    let response = app.oneshot(get("/chart")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );

    let bytes = body_bytes(response).await;
    assert_eq!(&bytes[..8], &PNG_MAGIC);
}

#[tokio::test]
async fn profit_chart_returns_png_even_when_quotes_fail() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_post("/add_transaction", "symbol=BTC&amount=0.5&price=60000"))
        .await
        .unwrap();
    app.clone()
        .oneshot(form_post("/add_transaction", "symbol=ETH&amount=2&price=3000"))
        .await
        .unwrap();

    let response = app.oneshot(get("/profit_chart")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );

    let bytes = body_bytes(response).await;
    assert_eq!(&bytes[..8], &PNG_MAGIC);
}

#[tokio::test]
async fn charts_render_on_an_empty_portfolio() {
    let app = test_app().await;

    for uri in ["/chart", "/profit_chart"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let bytes = body_bytes(response).await;
        assert_eq!(&bytes[..8], &PNG_MAGIC, "{uri}");
    }
}

#[tokio::test]
async fn health_reports_row_count() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_post("/add_transaction", "symbol=BTC&amount=1&price=1"))
        .await
        .unwrap();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["transactions"], 1);
}
