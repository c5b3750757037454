//! HTTP-level tests for login, logout, session cookies and `/auth/me`.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{body_json, create_user, get, get_auth, post_json, token_for};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn login(app: axum::Router, username: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": username, "password": "any-password" }),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_login_creates_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = login(app, "peach").await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("questlearn_session="));
    assert!(cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["username"], "peach");
    assert_eq!(json["user"]["email"], "peach@test.local");
    assert_eq!(json["user"]["score"], 0);
    assert_eq!(json["user"]["is_admin"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeat_login_reuses_user(pool: PgPool) {
    let existing = create_user(&pool, "toad", false).await;
    let app = common::build_test_app(pool.clone());

    let json = body_json(login(app, "toad").await).await;
    assert_eq!(json["user"]["id"], existing.id);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_requires_both_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/auth/login", json!({ "username": "x" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "password is required");

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "  ", "password": "pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_with_bearer_token(pool: PgPool) {
    let user = create_user(&pool, "daisy", false).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["id"], user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_with_session_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);
    let login_json = body_json(login(app.clone(), "wario").await).await;
    let token = login_json["access_token"].as_str().unwrap();

    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .header(header::COOKIE, format!("questlearn_session={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["username"], "wario");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = get_auth(app, "/api/v1/auth/me", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_for_deleted_user_is_404(pool: PgPool) {
    let user = create_user(&pool, "ghost", false).await;
    let token = token_for(&user);
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_clears_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/logout", json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(body_json(response).await["message"], "Logged out successfully");
}
