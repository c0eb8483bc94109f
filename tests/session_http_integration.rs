//! Integration tests for the session HTTP API.
//!
//! These tests drive the full router (middleware included) over in-memory
//! storage:
//! 1. Session create / fetch / list / update / delete
//! 2. Event append and listing, including the recording policies
//! 3. Validation and error body shape

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use session_recorder::adapters::memory::{InMemoryEventStore, InMemorySessionStore};
use session_recorder::config::{AppConfig, FeatureFlags};
use session_recorder::server::{build_app, Storage};

const CLIENT: &str = "507f1f77bcf86cd799439011";
const VISITOR: &str = "507f191e810c19729de860ea";
const OTHER_VISITOR: &str = "65a1b2c3d4e5f60718293a4b";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    sessions: InMemorySessionStore,
    events: InMemoryEventStore,
}

impl TestApp {
    fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    fn with_features(features: FeatureFlags) -> Self {
        Self::with_config(AppConfig {
            features,
            ..Default::default()
        })
    }

    fn with_config(config: AppConfig) -> Self {
        let sessions = InMemorySessionStore::new();
        let events = InMemoryEventStore::new();
        let storage = Storage {
            sessions: Arc::new(sessions.clone()),
            reader: Arc::new(sessions.clone()),
            events: Arc::new(events.clone()),
            health: Arc::new(sessions.clone()),
        };
        Self {
            router: build_app(&config, storage),
            sessions,
            events,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn create_session(&self, client: &str, visitor: &str) -> Value {
        let (status, body) = self
            .send_json(
                "POST",
                "/sessions",
                json!({ "clientId": client, "visitorId": visitor }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

fn id_of(body: &Value) -> &str {
    body["id"].as_str().unwrap()
}

fn assert_error(body: &Value, code: &str) {
    assert!(body["error"].is_string(), "missing error message: {body}");
    assert_eq!(body["code"], code, "{body}");
}

// =============================================================================
// Session creation
// =============================================================================

#[tokio::test]
async fn create_session_returns_fresh_record() {
    let app = TestApp::new();

    let body = app.create_session(CLIENT, VISITOR).await;

    assert_eq!(id_of(&body).len(), 24);
    assert_eq!(body["clientId"], CLIENT);
    assert_eq!(body["visitorId"], VISITOR);
    assert_eq!(body["durationInSeconds"], 0);
    assert_eq!(body["createdAt"], body["updatedAt"]);
    assert_eq!(body["createdAt"], body["lastEventTime"]);
}

#[tokio::test]
async fn each_created_session_gets_unique_id() {
    let app = TestApp::new();

    let first = app.create_session(CLIENT, VISITOR).await;
    let second = app.create_session(CLIENT, VISITOR).await;

    assert_ne!(id_of(&first), id_of(&second));
    assert_eq!(app.sessions.len().await, 2);
}

#[tokio::test]
async fn create_session_with_malformed_ids_is_rejected() {
    let app = TestApp::new();

    for (body, code) in [
        (json!({ "clientId": "not-an-id", "visitorId": VISITOR }), "INVALID_FORMAT"),
        (json!({ "clientId": CLIENT, "visitorId": "1234" }), "INVALID_FORMAT"),
        (json!({ "clientId": CLIENT }), "EMPTY_FIELD"),
        (json!({ "clientId": "000000000000000000000000", "visitorId": VISITOR }), "INVALID_FORMAT"),
    ] {
        let (status, response) = app.send_json("POST", "/sessions", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&response, code);
    }
    assert!(app.sessions.is_empty().await);
}

#[tokio::test]
async fn malformed_json_body_is_400() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/sessions")
                .header("content-type", "application/json")
                .body(Body::from("{\"clientId\": "))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_FAILED");
}

// =============================================================================
// Session fetch / update / delete
// =============================================================================

#[tokio::test]
async fn get_session_by_id() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;

    let (status, body) = app.get(&format!("/sessions/{}", id_of(&created))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn get_unknown_session_is_404() {
    let app = TestApp::new();

    let (status, body) = app.get("/sessions/65a1b2c3d4e5f60718293a4c").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn get_session_with_malformed_id_is_400() {
    let app = TestApp::new();

    let (status, body) = app.get("/sessions/xyz").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "INVALID_FORMAT");
}

#[tokio::test]
async fn patch_session_updates_duration() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;
    let uri = format!("/sessions/{}", id_of(&created));

    let (status, body) = app
        .send_json("PATCH", &uri, json!({ "durationInSeconds": 120 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["durationInSeconds"], 120);
    assert_eq!(body["createdAt"], created["createdAt"]);

    let (_, fetched) = app.get(&uri).await;
    assert_eq!(fetched["durationInSeconds"], 120);
}

#[tokio::test]
async fn patch_with_last_event_before_creation_is_400() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;

    let (status, body) = app
        .send_json(
            "PATCH",
            &format!("/sessions/{}", id_of(&created)),
            json!({ "lastEventTime": "2000-01-01T00:00:00Z" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_FAILED");
}

#[tokio::test]
async fn patch_with_duration_storage_cannot_hold_is_400() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;
    let uri = format!("/sessions/{}", id_of(&created));

    let (status, body) = app
        .send_json("PATCH", &uri, json!({ "durationInSeconds": u64::MAX }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "OUT_OF_RANGE");

    let (_, fetched) = app.get(&uri).await;
    assert_eq!(fetched["durationInSeconds"], 0);
}

#[tokio::test]
async fn patch_unknown_session_is_404() {
    let app = TestApp::new();

    let (status, body) = app
        .send_json(
            "PATCH",
            "/sessions/65a1b2c3d4e5f60718293a4c",
            json!({ "durationInSeconds": 1 }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn deleting_twice_is_204_then_404() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;
    app.create_session(CLIENT, OTHER_VISITOR).await;
    let uri = format!("/sessions/{}", id_of(&created));

    let (first, _) = app.delete(&uri).await;
    let (second, body) = app.delete(&uri).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_error(&body, "SESSION_NOT_FOUND");
    assert_eq!(app.sessions.len().await, 1);
}

#[tokio::test]
async fn deleting_session_keeps_its_events() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;
    let id = id_of(&created);
    app.send_json(
        "POST",
        &format!("/sessions/{id}/event"),
        json!({ "domEvent": "click" }),
    )
    .await;

    app.delete(&format!("/sessions/{id}")).await;

    assert_eq!(app.events.len().await, 1);
}

// =============================================================================
// Session listing
// =============================================================================

#[tokio::test]
async fn list_with_no_matches_is_empty_array() {
    let app = TestApp::new();

    let (status, body) = app
        .get(&format!("/sessions?clientId={CLIENT}&offset=0&limit=10"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_filters_by_client_and_visitor() {
    let app = TestApp::new();
    app.create_session(CLIENT, VISITOR).await;
    app.create_session(CLIENT, VISITOR).await;
    app.create_session(CLIENT, OTHER_VISITOR).await;
    app.create_session("5f8d0d55b54764421b7156c9", VISITOR).await;

    let (_, by_client) = app.get(&format!("/sessions?clientId={CLIENT}")).await;
    assert_eq!(by_client.as_array().unwrap().len(), 3);

    let (_, by_visitor) = app
        .get(&format!("/sessions?clientId={CLIENT}&visitorId={VISITOR}"))
        .await;
    let sessions = by_visitor.as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().all(|s| s["visitorId"] == VISITOR));
}

#[tokio::test]
async fn list_pages_through_sessions_in_creation_order() {
    let app = TestApp::new();
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(id_of(&app.create_session(CLIENT, VISITOR).await).to_string());
    }

    let (status, body) = app
        .get(&format!("/sessions?clientId={CLIENT}&offset=1&limit=2"))
        .await;

    assert_eq!(status, StatusCode::OK);
    let page: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(page, vec![ids[1].as_str(), ids[2].as_str()]);
}

#[tokio::test]
async fn list_with_zero_limit_is_empty() {
    let app = TestApp::new();
    app.create_session(CLIENT, VISITOR).await;

    let (status, body) = app.get(&format!("/sessions?clientId={CLIENT}&limit=0")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_rejects_bad_pagination_and_ids() {
    let app = TestApp::new();

    for (uri, code) in [
        (format!("/sessions?clientId={CLIENT}&offset=-1"), "OUT_OF_RANGE"),
        (format!("/sessions?clientId={CLIENT}&limit=abc"), "INVALID_FORMAT"),
        (format!("/sessions?clientId={CLIENT}&limit=-10"), "OUT_OF_RANGE"),
        (format!("/sessions?clientId={CLIENT}&offset=1.5"), "INVALID_FORMAT"),
        (format!("/sessions?clientId={CLIENT}&visitorId=zzz"), "INVALID_FORMAT"),
        (format!("/sessions?clientId=%20{CLIENT}"), "INVALID_FORMAT"),
        (format!("/sessions?clientId={CLIENT}%20"), "INVALID_FORMAT"),
        ("/sessions?clientId=123".to_string(), "INVALID_FORMAT"),
        ("/sessions".to_string(), "EMPTY_FIELD"),
    ] {
        let (status, body) = app.get(&uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_error(&body, code);
    }
}

#[tokio::test]
async fn list_accepts_offset_beyond_signed_range() {
    let app = TestApp::new();
    app.create_session(CLIENT, VISITOR).await;

    let (status, body) = app
        .get(&format!("/sessions?clientId={CLIENT}&offset=9223372036854775808"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn unreadable_query_string_gets_json_error_body() {
    let app = TestApp::new();

    let (status, body) = app
        .get(&format!("/sessions?clientId={CLIENT}&clientId={CLIENT}"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_FAILED");
}

#[tokio::test]
async fn padded_path_id_is_rejected() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;

    let (status, body) = app.get(&format!("/sessions/%20{}", id_of(&created))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "INVALID_FORMAT");
}

// =============================================================================
// Events
// =============================================================================

#[tokio::test]
async fn append_event_links_it_to_session() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;
    let id = id_of(&created);

    let (status, body) = app
        .send_json(
            "POST",
            &format!("/sessions/{id}/event"),
            json!({ "domEvent": "{\"type\":\"click\",\"target\":\"#buy\"}" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sessionId"], id);
    assert_eq!(body["domEvent"], "{\"type\":\"click\",\"target\":\"#buy\"}");
    assert_eq!(body["id"].as_str().unwrap().len(), 24);
}

#[tokio::test]
async fn append_event_updates_session_activity() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;
    let id = id_of(&created);
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (_, event) = app
        .send_json(
            "POST",
            &format!("/sessions/{id}/event"),
            json!({ "domEvent": "scroll" }),
        )
        .await;

    let (_, session) = app.get(&format!("/sessions/{id}")).await;
    assert_eq!(session["lastEventTime"], event["createdAt"]);
}

#[tokio::test]
async fn empty_dom_event_is_400_and_not_stored() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;

    for payload in [json!({ "domEvent": "" }), json!({ "domEvent": "   " }), json!({})] {
        let (status, body) = app
            .send_json(
                "POST",
                &format!("/sessions/{}/event", id_of(&created)),
                payload,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "EMPTY_FIELD");
    }
    assert!(app.events.is_empty().await);
}

#[tokio::test]
async fn event_for_malformed_session_id_is_400() {
    let app = TestApp::new();

    let (status, _) = app
        .send_json("POST", "/sessions/nope/event", json!({ "domEvent": "click" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.events.is_empty().await);
}

#[tokio::test]
async fn event_for_unknown_session_is_404_when_enforced() {
    let app = TestApp::new();

    let (status, body) = app
        .send_json(
            "POST",
            "/sessions/65a1b2c3d4e5f60718293a4c/event",
            json!({ "domEvent": "click" }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "SESSION_NOT_FOUND");
    assert!(app.events.is_empty().await);
}

#[tokio::test]
async fn event_for_unknown_session_is_accepted_when_not_enforced() {
    let app = TestApp::with_features(FeatureFlags {
        enforce_session_exists: false,
        track_session_activity: true,
    });

    let (status, _) = app
        .send_json(
            "POST",
            "/sessions/65a1b2c3d4e5f60718293a4c/event",
            json!({ "domEvent": "click" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.events.len().await, 1);
}

#[tokio::test]
async fn list_events_returns_them_in_order() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;
    let id = id_of(&created);
    for payload in ["first", "second", "third"] {
        app.send_json(
            "POST",
            &format!("/sessions/{id}/event"),
            json!({ "domEvent": payload }),
        )
        .await;
    }

    let (status, body) = app.get(&format!("/sessions/{id}/events?limit=2")).await;

    assert_eq!(status, StatusCode::OK);
    let payloads: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["domEvent"].as_str().unwrap())
        .collect();
    assert_eq!(payloads, vec!["first", "second"]);
}

#[tokio::test]
async fn list_events_rejects_negative_offset() {
    let app = TestApp::new();
    let created = app.create_session(CLIENT, VISITOR).await;

    let (status, body) = app
        .get(&format!("/sessions/{}/events?offset=-3", id_of(&created)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "OUT_OF_RANGE");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_storage() {
    let app = TestApp::new();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
