mod common;

use axum::http::{StatusCode, header::SET_COOKIE};
use serde_json::{Value, json};

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = common::TestApp::new();
    app.seed_user("admin", "secret").await;
    let server = app.server();

    let response = server
        .post("/login")
        .json(&json!({ "username": "admin", "password": "secret" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "logged in successfully"
    );

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("LinkSession="));
    assert!(set_cookie.contains("Max-Age=3600"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(!set_cookie.contains("Secure"));

    let token = common::token_of(&common::session_cookie(&response));
    assert_eq!(token.len(), 43);
}

#[tokio::test]
async fn test_store_never_sees_raw_token() {
    let app = common::TestApp::new();
    let server = app.server();
    let cookie = app.login(&server).await;
    let token = common::token_of(&cookie);

    let hashes = app.sessions.stored_hashes();
    assert_eq!(hashes.len(), 1);
    assert_ne!(hashes[0], token);
    assert_eq!(hashes[0].len(), 64);
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = common::TestApp::new();
    app.seed_user("admin", "secret").await;
    let server = app.server();

    let wrong_password = server
        .post("/login")
        .json(&json!({ "username": "admin", "password": "nope" }))
        .await;
    let unknown_user = server
        .post("/login")
        .json(&json!({ "username": "ghost", "password": "secret" }))
        .await;

    for response in [wrong_password, unknown_user] {
        response.assert_status_bad_request();
        assert!(response.headers().get(SET_COOKIE).is_none());

        let body = response.json::<Value>();
        assert_eq!(body["error"]["code"], "invalid_credentials");
        assert_eq!(body["error"]["message"], "invalid username or password");
    }

    assert_eq!(app.sessions.len(), 0);
}

#[tokio::test]
async fn test_login_invalid_json() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server
        .post("/login")
        .json(&json!({ "username": "admin" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["message"], "invalid json");
}

#[tokio::test]
async fn test_user_echoes_session() {
    let app = common::TestApp::new();
    let server = app.server();
    let cookie = app.login(&server).await;

    let response = server.get("/user").add_header("Cookie", cookie.clone()).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["token"], common::token_of(&cookie));
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["is_admin"], true);
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_unknown_token_is_invalid_session() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server
        .get("/user")
        .add_header("Cookie", "LinkSession=forged")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "invalid session"
    );
}

#[tokio::test]
async fn test_session_round_trip() {
    let app = common::TestApp::new();
    let server = app.server();
    let cookie = app.login(&server).await;

    server
        .get("/user")
        .add_header("Cookie", cookie.clone())
        .await
        .assert_status_ok();

    let logout = server
        .get("/logout")
        .add_header("Cookie", cookie.clone())
        .await;

    logout.assert_status_ok();
    assert_eq!(
        logout.json::<Value>()["message"],
        "logged out successfully"
    );
    let cleared = logout.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.starts_with("LinkSession=;"));
    assert!(cleared.contains("Max-Age=0"));
    assert_eq!(app.sessions.len(), 0);

    let after = server.get("/user").add_header("Cookie", cookie).await;
    after.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(after.json::<Value>()["error"]["message"], "invalid session");
}

#[tokio::test]
async fn test_expired_session_rejected_and_removed() {
    let app = common::TestApp::new();
    let server = app.server();
    let cookie = app.login(&server).await;

    app.sessions.expire_all();

    let response = server.get("/user").add_header("Cookie", cookie).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "invalid session"
    );
    assert_eq!(app.sessions.len(), 0);
}

#[tokio::test]
async fn test_logout_without_session() {
    let app = common::TestApp::new();
    let server = app.server();

    let response = server.get("/logout").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "not logged in"
    );
}
