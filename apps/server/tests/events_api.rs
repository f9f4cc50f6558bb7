use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use calendar_server::{api::app_router, auth::AuthConfig, build_state, config::Config};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

const SECRET: &[u8; 32] = b"integration-test-secret-key-0001";

async fn build_test_router(seed_demo_data: bool) -> (TempDir, Router) {
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        auth: AuthConfig {
            jwt_secret: SECRET.to_vec(),
            audience: "api".to_string(),
            issuer: None,
        },
        seed_demo_data,
        log_format: "text".to_string(),
    };
    let state = build_state(&config).await.unwrap();
    (tmp, app_router(state, &config))
}

fn token_for(sub: &str) -> String {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 3600;
    encode(
        &Header::default(),
        &json!({ "sub": sub, "aud": "api", "exp": exp }),
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token_for(user)));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn standup() -> Value {
    json!({
        "subject": "Standup",
        "description": "Daily sync",
        "begin": "2022-02-01T09:00:00",
        "end": "2022-02-01T09:15:00"
    })
}

#[tokio::test]
async fn health_and_openapi_are_public() {
    let (_tmp, app) = build_test_router(false).await;

    let (status, _) = send(&app, Method::GET, "/api/v1/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/api/v1/readyz", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, doc) = send(&app, Method::GET, "/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/v1/events").is_some());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let (_tmp, app) = build_test_router(false).await;

    let request = Request::builder()
        .uri("/api/v1/healthz")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let generated = response
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(!generated.is_empty());

    let request = Request::builder()
        .uri("/api/v1/healthz")
        .header("x-request-id", "client-supplied-id")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "client-supplied-id"
    );
}

#[tokio::test]
async fn events_require_a_valid_token() {
    let (_tmp, app) = build_test_router(false).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/events/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let request = Request::builder()
        .uri("/api/v1/events/1")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/v1/events/1", Some("alice"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn event_lifecycle() {
    let (_tmp, app) = build_test_router(false).await;
    let user = Some("1");

    let (status, created) = send(&app, Method::POST, "/api/v1/events", user, Some(standup())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, json!({ "id": 1 }));

    let (status, _) = send(&app, Method::POST, "/api/v1/events", user, Some(standup())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, event) = send(&app, Method::GET, "/api/v1/events/1", user, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["subject"], "Standup");
    assert_eq!(event["begin"], "2022-02-01T09:00:00");

    let (status, events) = send(
        &app,
        Method::GET,
        "/api/v1/events?begin=2022-02-01T00:00:00&end=2022-02-02T00:00:00",
        user,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.as_array().map(Vec::len), Some(1));

    let mut unchanged = standup();
    unchanged["id"] = json!(1);
    let (status, _) = send(&app, Method::PUT, "/api/v1/events", user, Some(unchanged)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let mut renamed = standup();
    renamed["id"] = json!(1);
    renamed["subject"] = json!("Retro");
    let (status, _) = send(&app, Method::PUT, "/api/v1/events", user, Some(renamed)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, event) = send(&app, Method::GET, "/api/v1/events/1", user, None).await;
    assert_eq!(event["subject"], "Retro");

    let mut missing = standup();
    missing["id"] = json!(99);
    let (status, _) = send(&app, Method::PUT, "/api/v1/events", user, Some(missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/events/1", user, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/events/1", user, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/v1/events/1", user, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn events_are_isolated_per_user() {
    let (_tmp, app) = build_test_router(false).await;

    let (status, _) = send(&app, Method::POST, "/api/v1/events", Some("1"), Some(standup())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/api/v1/events/1", Some("2"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/events/1", Some("2"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The same event for another user is not a duplicate.
    let (status, created) =
        send(&app, Method::POST, "/api/v1/events", Some("2"), Some(standup())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 2);
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let (_tmp, app) = build_test_router(false).await;
    let user = Some("1");

    let mut no_subject = standup();
    no_subject.as_object_mut().unwrap().remove("subject");
    let (status, body) = send(&app, Method::POST, "/api/v1/events", user, Some(no_subject)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let mut long_subject = standup();
    long_subject["subject"] = json!("x".repeat(101));
    let (status, _) = send(&app, Method::POST, "/api/v1/events", user, Some(long_subject)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut backwards = standup();
    backwards["end"] = json!("2022-02-01T08:00:00");
    let (status, _) = send(&app, Method::POST, "/api/v1/events", user, Some(backwards)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/api/v1/events", user, Some(json!("oops"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut zero_id = standup();
    zero_id["id"] = json!(0);
    let (status, _) = send(&app, Method::PUT, "/api/v1/events", user, Some(zero_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/v1/events/0", user, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/events/-3", user, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/v1/events/abc", user, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/events?begin=2022-02-01T00:00:00&end=2022-02-01T00:00:00",
        user,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn demo_event_is_seeded_for_user_one() {
    let (_tmp, app) = build_test_router(true).await;

    let today = chrono::Local::now().date_naive();
    let tomorrow = today.succ_opt().unwrap();
    let uri = format!(
        "/api/v1/events?begin={}T00:00:00&end={}T00:00:00",
        today, tomorrow
    );

    let (status, events) = send(&app, Method::GET, &uri, Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    let events = events.as_array().cloned().unwrap_or_default();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["subject"], "DemoCalendar");
    assert_eq!(events[0]["begin"], format!("{}T15:00:00", today));
    assert_eq!(events[0]["end"], format!("{}T15:15:00", today));
}
