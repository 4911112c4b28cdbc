mod common;

use axum::{
    body::{Body, to_bytes},
    extract::State,
    http::{Request, StatusCode},
};
use common::{Fixture, LIBRARY_INSERT};
use navigator_import::handlers::import::import_handler;
use navigator_import::middleware::auth::RequireImportKey;
use navigator_import::router::{NavigatorState, navigator_router};
use tower::ServiceExt;

async fn body_string(resp: axum::response::Response) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

fn assert_send<T: Send + 'static>(_: &T) {}

#[tokio::test]
async fn import_handler_future_can_run_on_the_server_runtime() {
    let fx = Fixture::new().await;
    let cfg = fx.config(fx.write_script(LIBRARY_INSERT));
    let state = NavigatorState::from_config(&cfg);

    let fut = import_handler(State(state), RequireImportKey);
    assert_send(&fut);

    let resp = tokio::spawn(fut).await.expect("handler task panicked");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn import_route_renders_success_page() {
    let fx = Fixture::new().await;
    let cfg = fx.config(fx.write_script(LIBRARY_INSERT));
    let app = navigator_router(NavigatorState::from_config(&cfg));

    let resp = app.oneshot(get("/import")).await.expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let body = body_string(resp).await;
    assert!(body.contains("Reading SQL file...<br>"));
    assert!(body.contains("Re-enabling foreign key checks...<br>"));
    assert!(body.contains("Database imported successfully!"));
    assert!(fx.store.find_by_name("Library").await.expect("query failed").is_some());
}

#[tokio::test]
async fn import_route_reports_missing_script_as_404() {
    let fx = Fixture::new().await;
    let cfg = fx.config(fx.missing_script());
    let app = navigator_router(NavigatorState::from_config(&cfg));

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/import")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_string(resp).await;
    assert!(body.contains("Import failed:"));
    assert!(body.contains("SQL file not found at:"));
}

#[tokio::test]
async fn import_route_passes_engine_error_through() {
    let fx = Fixture::new().await;
    let cfg = fx.config(fx.write_script("INSERT INTO nowhere (x) VALUES (1);"));
    let app = navigator_router(NavigatorState::from_config(&cfg));

    let resp = app.oneshot(get("/import")).await.expect("request failed");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(resp).await;
    assert!(body.contains("no such table: nowhere"));
}

#[tokio::test]
async fn configured_key_gates_the_import_route() {
    let fx = Fixture::new().await;
    let mut cfg = fx.config(fx.write_script(LIBRARY_INSERT));
    cfg.basic.import_key = Some("pwd".to_string());
    let app = navigator_router(NavigatorState::from_config(&cfg));

    let resp = app
        .clone()
        .oneshot(get("/import"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(fx.store.count().await.expect("count failed"), 0);

    let resp = app
        .oneshot(get("/import?key=pwd"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(fx.store.count().await.expect("count failed"), 1);
}

#[tokio::test]
async fn concurrent_import_is_turned_away() {
    let fx = Fixture::new().await;
    let cfg = fx.config(fx.write_script(LIBRARY_INSERT));
    let state = NavigatorState::from_config(&cfg);
    let app = navigator_router(state.clone());

    let _running = state.import_lock.lock().await;
    let resp = app.oneshot(get("/import")).await.expect("request failed");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(body_string(resp).await.contains("already running"));
    assert_eq!(fx.store.count().await.expect("count failed"), 0);
}

#[tokio::test]
async fn health_route_answers_ok() {
    let fx = Fixture::new().await;
    let cfg = fx.config(fx.missing_script());
    let app = navigator_router(NavigatorState::from_config(&cfg));

    let resp = app.oneshot(get("/health")).await.expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "ok");
}
