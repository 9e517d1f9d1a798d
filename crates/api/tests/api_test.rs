// Router-level tests for the Eventhub API
// Run with: cargo test -p eventhub-api --test api_test
// Uses the in-memory store; no external services needed

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use eventhub_api::auth::{AuthConfig, JwtConfig, TokenService};
use eventhub_api::config::{AppConfig, CorsOrigins, Environment};
use eventhub_api::{build_app, storage::StorageBackend};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "integration-test-secret-0123456789abcdef";

struct TestApp {
    app: Router,
    db: Arc<StorageBackend>,
    tokens: TokenService,
}

impl TestApp {
    fn new() -> Self {
        let mut auth = AuthConfig::new(JwtConfig::new(SECRET));
        auth.hash_cost = 4;
        let config = AppConfig {
            environment: Environment::Test,
            port: 0,
            database_url: None,
            cors_origins: CorsOrigins::Any,
            auth,
        };

        let db = Arc::new(StorageBackend::in_memory());
        Self {
            app: build_app(&config, db.clone()),
            db,
            tokens: TokenService::new(config.auth.jwt.clone()),
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    /// Register a user and return (user id, access token)
    async fn register(&self, name: &str, email: &str) -> (Uuid, String) {
        let (status, _, body) = self
            .call(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "name": name, "email": email, "password": "password123" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        let id = body["user"]["id"].as_str().unwrap().parse().unwrap();
        let token = body["tokens"]["accessToken"].as_str().unwrap().to_string();
        (id, token)
    }

    async fn create_event(&self, token: &str, title: &str) -> Value {
        let (status, _, body) = self
            .call(
                Method::POST,
                "/api/events",
                Some(token),
                Some(event_body(title)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body
    }
}

fn event_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Talks, food and open discussion",
        "date": (Utc::now() + Duration::days(14)).to_rfc3339(),
        "location": "Amsterdam",
        "maxAttendees": 60,
        "category": "conference"
    })
}

fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .find(|v| v.starts_with("token="))
        .expect("token cookie set")
}

// ============================================
// Authentication
// ============================================

#[tokio::test]
async fn test_register_returns_user_and_tokens() {
    let app = TestApp::new();

    let (status, headers, body) = app
        .call(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": "Jo Lee", "email": "jo@x.com", "password": "password123" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "jo@x.com");
    assert_eq!(body["user"]["name"], "Jo Lee");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"]["createdAt"].is_string());
    assert!(!body["tokens"]["accessToken"].as_str().unwrap().is_empty());
    assert!(!body["tokens"]["refreshToken"].as_str().unwrap().is_empty());

    let cookie = cookie_header(&headers);
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_register_then_login_tokens_identify_user() {
    let app = TestApp::new();
    let (user_id, register_token) = app.register("Jo Lee", "jo@x.com").await;

    let (status, _, body) = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "jo@x.com", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id.to_string());

    let login_access = body["tokens"]["accessToken"].as_str().unwrap();
    let login_refresh = body["tokens"]["refreshToken"].as_str().unwrap();
    assert_eq!(app.tokens.verify(&register_token).unwrap().user_id, user_id);
    assert_eq!(app.tokens.verify(login_access).unwrap().user_id, user_id);
    assert_eq!(app.tokens.verify(login_refresh).unwrap().user_id, user_id);
}

#[tokio::test]
async fn test_duplicate_email_conflicts_case_insensitively() {
    let app = TestApp::new();
    app.register("Jo Lee", "jo@x.com").await;

    let (status, _, body) = app
        .call(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": "Jo Again", "email": "JO@X.COM", "password": "password456" })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Email already registered" }));
    assert_eq!(app.db.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_login_failures_look_identical() {
    let app = TestApp::new();
    app.register("Jo Lee", "jo@x.com").await;

    let unknown = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@x.com", "password": "password123" })),
        )
        .await;
    let wrong = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "jo@x.com", "password": "password999" })),
        )
        .await;

    assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.0, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.2, wrong.2);
    assert_eq!(unknown.2, json!({ "error": "Invalid email or password" }));
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new();

    let (status, _, body) = app
        .call(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": "J", "email": "not-an-email", "password": "short" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");
    assert_eq!(body["details"].as_array().unwrap().len(), 3);
    assert_eq!(app.db.count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let (status, _, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");
}

#[tokio::test]
async fn test_me_with_cookie_and_header() {
    let app = TestApp::new();
    let (user_id, token) = app.register("Jo Lee", "jo@x.com").await;

    let (status, _, body) = app.call(Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id.to_string());

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("token={}", token))
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "jo@x.com");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();

    let (status, headers, body) = app.call(Method::POST, "/api/auth/logout", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Logged out successfully" }));
    let cookie = cookie_header(&headers);
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_protected_route_requires_credentials() {
    let app = TestApp::new();

    let (status, _, body) = app
        .call(Method::POST, "/api/events", None, Some(event_body("Rust Night")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    let (status, _, body) = app
        .call(
            Method::POST,
            "/api/events",
            Some("garbage.token.value"),
            Some(event_body("Rust Night")),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_refresh_token_cannot_call_protected_routes() {
    let app = TestApp::new();
    app.register("Jo Lee", "jo@x.com").await;

    let (_, _, body) = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "jo@x.com", "password": "password123" })),
        )
        .await;
    let refresh = body["tokens"]["refreshToken"].as_str().unwrap();

    let (status, _, _) = app.call(Method::GET, "/api/auth/me", Some(refresh), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================
// Events
// ============================================

#[tokio::test]
async fn test_event_lifecycle() {
    let app = TestApp::new();
    let (user_id, token) = app.register("Jo Lee", "jo@x.com").await;

    let event = app.create_event(&token, "Rust Night").await;
    assert_eq!(event["status"], "draft");
    assert_eq!(event["organizer"], user_id.to_string());
    assert_eq!(event["maxAttendees"], 60);
    let id = event["id"].as_str().unwrap();

    // Drafts are not listed
    let (status, _, body) = app.call(Method::GET, "/api/events", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));

    let (status, _, body) = app
        .call(
            Method::PUT,
            &format!("/api/events/{}", id),
            Some(&token),
            Some(json!({ "status": "published", "location": "Rotterdam" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "published");
    assert_eq!(body["location"], "Rotterdam");
    assert_eq!(body["title"], "Rust Night");

    let (_, _, body) = app.call(Method::GET, "/api/events", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _, body) = app
        .call(Method::GET, &format!("/api/events/{}", id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    let (status, _, body) = app
        .call(Method::DELETE, &format!("/api/events/{}", id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _, body) = app
        .call(Method::GET, &format!("/api/events/{}", id), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Event not found" }));
}

#[tokio::test]
async fn test_non_owner_cannot_update_or_delete() {
    let app = TestApp::new();
    let (_, owner_token) = app.register("Jo Lee", "jo@x.com").await;
    let (_, other_token) = app.register("Sam Poe", "sam@x.com").await;

    let event = app.create_event(&owner_token, "Rust Night").await;
    let uri = format!("/api/events/{}", event["id"].as_str().unwrap());

    let (status, _, body) = app
        .call(
            Method::PUT,
            &uri,
            Some(&other_token),
            Some(json!({ "title": "Hijacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Event not found" }));

    let (status, _, _) = app.call(Method::DELETE, &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = app.call(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Rust Night");
    assert_eq!(body["updatedAt"], event["updatedAt"]);
}

#[tokio::test]
async fn test_unauthenticated_update_leaves_event_unchanged() {
    let app = TestApp::new();
    let (_, token) = app.register("Jo Lee", "jo@x.com").await;
    let event = app.create_event(&token, "Rust Night").await;
    let uri = format!("/api/events/{}", event["id"].as_str().unwrap());

    let (status, _, _) = app
        .call(Method::PUT, &uri, None, Some(json!({ "title": "Changed" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, _, body) = app.call(Method::GET, &uri, None, None).await;
    assert_eq!(body["title"], "Rust Night");
}

#[tokio::test]
async fn test_create_event_validation() {
    let app = TestApp::new();
    let (_, token) = app.register("Jo Lee", "jo@x.com").await;

    let (status, _, body) = app
        .call(
            Method::POST,
            "/api/events",
            Some(&token),
            Some(json!({
                "title": "",
                "description": "Talks",
                "date": (Utc::now() - Duration::days(1)).to_rfc3339(),
                "location": "Amsterdam",
                "maxAttendees": 0
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert!(details.contains(&"title is required"));
    assert!(details.contains(&"maxAttendees must be at least 1"));
    assert!(details.contains(&"date must be in the future"));
}

#[tokio::test]
async fn test_unknown_event_is_not_found() {
    let app = TestApp::new();
    let (status, _, _) = app
        .call(
            Method::GET,
            &format!("/api/events/{}", Uuid::now_v7()),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_event_id_is_json_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.register("Jo Lee", "jo@x.com").await;

    let (status, _, body) = app
        .call(Method::GET, "/api/events/not-a-uuid", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");

    let (status, _, body) = app
        .call(
            Method::PUT,
            "/api/events/not-a-uuid",
            Some(&token),
            Some(json!({ "title": "Renamed" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");
    assert!(body["details"].as_array().is_some_and(|d| !d.is_empty()));

    let (status, _, body) = app
        .call(Method::DELETE, "/api/events/not-a-uuid", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
