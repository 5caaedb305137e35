mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use contacts_api::routes::{app_router, normalize_paths};
use tower::ServiceExt;

async fn status_of(ctx: &common::TestContext, method: &str, uri: &str) -> StatusCode {
    let app = normalize_paths(app_router(ctx.state.clone(), &ctx.router_options()));
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let ctx = common::create_test_context().await;
    let contact = common::seed_contact(&ctx.repo, "Alice", false).await;

    assert_eq!(status_of(&ctx, "GET", "/api/v1/contacts/").await, StatusCode::OK);
    assert_eq!(
        status_of(&ctx, "GET", &format!("/api/v1/contacts/{}/", contact.id)).await,
        StatusCode::OK
    );
    assert_eq!(status_of(&ctx, "GET", "/health/").await, StatusCode::OK);
}

#[tokio::test]
async fn test_head_is_answered_by_get_handler() {
    let ctx = common::create_test_context().await;

    assert_eq!(status_of(&ctx, "HEAD", "/api/v1/contacts").await, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_public_file() {
    let ctx = common::create_test_context().await;

    assert_eq!(
        status_of(&ctx, "GET", "/public/uploads/missing.png").await,
        StatusCode::NOT_FOUND
    );
}
