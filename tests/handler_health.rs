mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_index_returns_version_banner() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server.get("/").await;

    response.assert_status_ok();
    assert_eq!(
        response.text(),
        format!("LinkShortener v{}", env!("CARGO_PKG_VERSION"))
    );
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = common::TestApp::new();
    app.seed_link("abc", "https://example.com", 0).await;
    let server = app.server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert!(
        json["checks"]["database"]["message"]
            .as_str()
            .unwrap()
            .contains("1 links")
    );
}

#[tokio::test]
async fn test_health_does_not_require_session() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server.get("/health").await;

    assert_ne!(response.status_code(), StatusCode::UNAUTHORIZED);
}
