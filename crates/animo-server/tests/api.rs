//! Router behavior with an in-memory store and a fake identity provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::FixedOffset;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use animo_auth::{AuthError, IdentityProvider};
use animo_core::entities::{Entry, NewEntry};
use animo_core::identity::AuthIdentity;
use animo_core::range::{TimeRange, now_ms};
use animo_db::error::DatabaseError;
use animo_db::{AnimoDb, EntryStore};
use animo_insights::InsightEngine;
use animo_server::{AppState, router};

struct FakeIdentity {
    deletions: AtomicUsize,
    can_delete: bool,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn verify(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        match token {
            "token-ana" => Ok(AuthIdentity {
                user_id: "ana".into(),
                email: Some("ana@example.com".into()),
            }),
            "token-beto" => Ok(AuthIdentity {
                user_id: "beto".into(),
                email: None,
            }),
            _ => Err(AuthError::InvalidToken),
        }
    }

    async fn delete_user(&self, _user_id: &str) -> Result<(), AuthError> {
        if !self.can_delete {
            return Err(AuthError::NotConfigured("no service role key".into()));
        }
        self.deletions.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct BrokenStore;

#[async_trait]
impl EntryStore for BrokenStore {
    async fn fetch(&self, _: &str, _: TimeRange) -> Result<Vec<Entry>, DatabaseError> {
        Err(DatabaseError::Query("connection reset".into()))
    }

    async fn insert(&self, _: &str, _: &NewEntry) -> Result<Entry, DatabaseError> {
        Err(DatabaseError::Query("connection reset".into()))
    }

    async fn delete_for_user(&self, _: &str) -> Result<u64, DatabaseError> {
        Err(DatabaseError::Query("connection reset".into()))
    }
}

struct Harness {
    app: Router,
    identity: Arc<FakeIdentity>,
}

fn state(store: Arc<dyn EntryStore>, identity: Arc<FakeIdentity>) -> Arc<AppState> {
    Arc::new(AppState {
        store,
        identity,
        engine: Arc::new(InsightEngine::heuristic(FixedOffset::east_opt(0).unwrap())),
        default_range_days: 30,
    })
}

async fn harness(can_delete: bool) -> Harness {
    let store = Arc::new(AnimoDb::open_local(":memory:").await.unwrap());
    let identity = Arc::new(FakeIdentity {
        deletions: AtomicUsize::new(0),
        can_delete,
    });
    Harness {
        app: router(state(store, identity.clone())),
        identity,
    }
}

fn broken() -> Router {
    let identity = Arc::new(FakeIdentity {
        deletions: AtomicUsize::new(0),
        can_delete: true,
    });
    router(state(Arc::new(BrokenStore), identity))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
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
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn entry_body(event_ts: i64, emotion: &str, intensity: f64, areas: &[&str]) -> Value {
    json!({
        "eventTs": event_ts,
        "emotions": [{"name": emotion, "intensity": intensity}],
        "thoughts": "Nunca me sale nada bien.",
        "lifeAreas": areas,
    })
}

#[tokio::test]
async fn health_needs_no_token() {
    let h = harness(true).await;
    let (status, body) = send(&h.app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn missing_token_is_401() {
    let h = harness(true).await;
    for (method, uri) in [
        (Method::POST, "/api/analyze"),
        (Method::GET, "/api/entries"),
        (Method::DELETE, "/api/me"),
    ] {
        let (status, body) = send(&h.app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "No token"}));
    }
}

#[tokio::test]
async fn rejected_token_is_401() {
    let h = harness(true).await;
    let (status, body) = send(&h.app, Method::POST, "/api/analyze", Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Invalid token"}));
}

#[tokio::test]
async fn create_then_list_entries() {
    let h = harness(true).await;
    let (status, created) = send(
        &h.app,
        Method::POST,
        "/api/entries",
        Some("token-ana"),
        Some(entry_body(1_000, "Alegre", 8.0, &["Ocio"])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].as_str().unwrap().starts_with("ent-"));
    assert_eq!(created["life_areas"], json!(["Ocio"]));

    let (status, listed) =
        send(&h.app, Method::GET, "/api/entries", Some("token-ana"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));

    let (_, other_user) =
        send(&h.app, Method::GET, "/api/entries", Some("token-beto"), None).await;
    assert_eq!(other_user, json!([]));
}

#[tokio::test]
async fn list_honors_query_range() {
    let h = harness(true).await;
    for ts in [1_000, 2_000, 3_000] {
        send(
            &h.app,
            Method::POST,
            "/api/entries",
            Some("token-ana"),
            Some(entry_body(ts, "Calma", 3.0, &[])),
        )
        .await;
    }
    let (_, listed) = send(
        &h.app,
        Method::GET,
        "/api/entries?from=1500&to=3000",
        Some("token-ana"),
        None,
    )
    .await;
    let stamps: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_ts"].as_i64().unwrap())
        .collect();
    assert_eq!(stamps, vec![3_000, 2_000]);
}

#[tokio::test]
async fn invalid_entries_are_400() {
    let h = harness(true).await;
    let cases = [
        json!({"eventTs": 1, "emotions": []}),
        json!({"eventTs": -5, "emotions": [{"name": "Ira", "intensity": 5}]}),
        json!({"eventTs": 1, "emotions": [{"name": "Ira", "intensity": 11}]}),
        json!({"emotions": [{"name": "Ira", "intensity": 5}]}),
    ];
    for case in cases {
        let (status, body) =
            send(&h.app, Method::POST, "/api/entries", Some("token-ana"), Some(case)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn bad_query_is_400() {
    let h = harness(true).await;
    let (status, _) = send(
        &h.app,
        Method::GET,
        "/api/entries?from=ayer",
        Some("token-ana"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_stored_entries() {
    let h = harness(true).await;
    let now = now_ms();
    send(
        &h.app,
        Method::POST,
        "/api/entries",
        Some("token-ana"),
        Some(entry_body(now - 60_000, "Triste", 6.0, &["Trabajo"])),
    )
    .await;

    let (status, body) = send(&h.app, Method::POST, "/api/analyze", Some("token-ana"), None).await;
    assert_eq!(status, StatusCode::OK);
    let insights = &body["insights"];
    assert!(
        insights["resumen_general"]
            .as_str()
            .unwrap()
            .starts_with("Has registrado 1 entradas")
    );
    assert_eq!(insights["top_disparadores"], json!([{"trigger": "Trabajo", "frecuencia": 1}]));
    assert_eq!(
        insights["creencias_limitantes"][0]["creencia"],
        "Nunca me sale nada bien."
    );
    assert_eq!(insights["automatismos"], json!([]));
}

#[tokio::test]
async fn analyze_empty_range_has_no_data_summary() {
    let h = harness(true).await;
    let (status, body) = send(
        &h.app,
        Method::POST,
        "/api/analyze",
        Some("token-ana"),
        Some(json!({"range": {"from": 0, "to": 10}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["insights"]["resumen_general"],
        "Aún no hay registros para este rango."
    );
}

#[tokio::test]
async fn analyze_falls_back_to_inline_records() {
    let h = harness(true).await;
    let (status, body) = send(
        &h.app,
        Method::POST,
        "/api/analyze",
        Some("token-ana"),
        Some(json!({
            "records": [
                {"id": "r1", "ts": 1_000, "emotions": [{"name": "Alegre", "intensity": 8}], "lifeAreas": ["Ocio"]},
                {"id": "r2", "ts": "no-es-fecha", "emotions": [{"name": "Triste", "intensity": 6}]},
                {"id": "r3", "date": "2024-01-02", "emotions": [{"name": "Triste", "intensity": 6}],
                 "thoughts": "Nadie me escucha.", "lifeAreas": ["Familia"]}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let insights = &body["insights"];
    assert!(
        insights["resumen_general"]
            .as_str()
            .unwrap()
            .starts_with("Has registrado 2 entradas")
    );
    assert_eq!(insights["creencias_limitantes"][0]["areas"], json!(["Familia"]));
}

#[tokio::test]
async fn malformed_inline_records_are_skipped_not_rejected() {
    let h = harness(true).await;
    let (status, body) = send(
        &h.app,
        Method::POST,
        "/api/analyze",
        Some("token-ana"),
        Some(json!({
            "records": [
                {"id": "r1", "ts": 1_000, "emotions": [{"name": "Alegre", "intensity": 8}], "lifeAreas": ["Ocio"]},
                {"id": "r2", "ts": 2_000, "emotions": [{"name": "Triste", "intensity": "6"}, {"intensity": 3}],
                 "lifeAreas": ["Trabajo"]},
                "no es un registro"
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let insights = &body["insights"];
    assert!(
        insights["resumen_general"]
            .as_str()
            .unwrap()
            .starts_with("Has registrado 2 entradas")
    );
    assert_eq!(
        insights["top_disparadores"],
        json!([
            {"trigger": "Ocio", "frecuencia": 1},
            {"trigger": "Trabajo", "frecuencia": 1}
        ])
    );
}

#[tokio::test]
async fn inverted_range_is_400() {
    let h = harness(true).await;
    let (status, _) = send(
        &h.app,
        Method::POST,
        "/api/analyze",
        Some("token-ana"),
        Some(json!({"range": {"from": 10, "to": 5}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storage_failure_is_generic_500() {
    let app = broken();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/analyze",
        Some("token-ana"),
        Some(json!({"records": [{"id": "r1", "ts": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "No se pudo analizar los datos"}));
}

#[tokio::test]
async fn delete_me_removes_entries_and_account() {
    let h = harness(true).await;
    send(
        &h.app,
        Method::POST,
        "/api/entries",
        Some("token-ana"),
        Some(entry_body(1_000, "Alegre", 8.0, &[])),
    )
    .await;

    let (status, body) = send(&h.app, Method::DELETE, "/api/me", Some("token-ana"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
    assert_eq!(h.identity.deletions.load(Ordering::SeqCst), 1);

    let (_, listed) = send(&h.app, Method::GET, "/api/entries", Some("token-ana"), None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn delete_me_without_admin_key_still_clears_entries() {
    let h = harness(false).await;
    let (status, body) = send(&h.app, Method::DELETE, "/api/me", Some("token-ana"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
    assert_eq!(h.identity.deletions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wrong_method_is_405() {
    let h = harness(true).await;
    let (status, _) = send(&h.app, Method::GET, "/api/analyze", Some("token-ana"), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
