#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use swipe_core::config::GameConfig;
use tokio::net::TcpListener;

pub const KEY: &str = "test-anon-key";

// --- Game configs ---

pub fn quiet_config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.rules.trap_chance = 0.0;
    cfg.rules.fake_chance_per_level = 0.0;
    cfg
}

pub fn trap_config() -> GameConfig {
    let mut cfg = quiet_config();
    cfg.rules.trap_chance = 1.0;
    cfg
}

pub fn fake_config() -> GameConfig {
    let mut cfg = quiet_config();
    cfg.rules.fake_chance_per_level = 1.0;
    cfg.rules.fake_chance_cap = 1.0;
    cfg.timing.fake_delay_min_ms = 1000;
    cfg.timing.fake_delay_max_ms = 1000;
    cfg
}

// --- Mock leaderboard backend ---

/// In-memory stand-in for the `User` table.
#[derive(Default)]
pub struct MockBackend {
    pub users: Mutex<Vec<Value>>,
    pub patches: Mutex<Vec<(String, u32)>>,
    /// Lower scores answer slower: `(6 - score) * jitter_ms`.
    pub jitter_ms: u64,
}

impl MockBackend {
    pub fn seeded(users: &[(&str, Option<u32>)]) -> Arc<Self> {
        Self::seeded_with_jitter(users, 0)
    }

    pub fn seeded_with_jitter(users: &[(&str, Option<u32>)], jitter_ms: u64) -> Arc<Self> {
        let rows = users
            .iter()
            .map(|(name, score)| json!({ "username": name, "highest_score": score }))
            .collect();
        Arc::new(Self {
            users: Mutex::new(rows),
            patches: Mutex::new(Vec::new()),
            jitter_ms,
        })
    }

    pub fn score_of(&self, username: &str) -> Option<u64> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u["username"] == username)
            .and_then(|u| u["highest_score"].as_u64())
    }
}

type Shared = Arc<MockBackend>;

fn authorized(headers: &HeaderMap) -> bool {
    let key_ok = headers.get("apikey").map(|v| v == KEY).unwrap_or(false);
    let bearer_ok = headers
        .get("authorization")
        .map(|v| v == format!("Bearer {}", KEY).as_str())
        .unwrap_or(false);
    key_ok && bearer_ok
}

fn username_filter(q: &HashMap<String, String>) -> Option<String> {
    q.get("username")
        .and_then(|f| f.strip_prefix("eq."))
        .map(str::to_string)
}

async fn list_users(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }
    let filter = username_filter(&q);
    let only_name = q.get("select").map(String::as_str) == Some("username");

    let users = db.users.lock().unwrap();
    let rows: Vec<Value> = users
        .iter()
        .filter(|u| match &filter {
            Some(name) => u["username"] == name.as_str(),
            None => true,
        })
        .map(|u| {
            if only_name {
                json!({ "username": u["username"] })
            } else {
                u.clone()
            }
        })
        .collect();
    Json(rows).into_response()
}

async fn create_user(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }
    let mut users = db.users.lock().unwrap();
    if !users.iter().any(|u| u["username"] == body["username"]) {
        users.push(json!({
            "username": body["username"],
            "highest_score": null,
            "created_at": body["created_at"],
        }));
    }
    StatusCode::CREATED.into_response()
}

async fn patch_user(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }
    let Some(name) = username_filter(&q) else {
        return (StatusCode::BAD_REQUEST, "missing filter").into_response();
    };
    let score = body["highest_score"].as_u64().unwrap_or(0) as u32;
    if db.jitter_ms > 0 {
        let delay = 6u64.saturating_sub(score as u64) * db.jitter_ms;
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let mut users = db.users.lock().unwrap();
    for u in users.iter_mut().filter(|u| u["username"] == name.as_str()) {
        u["highest_score"] = json!(score);
    }
    db.patches.lock().unwrap().push((name, score));
    StatusCode::NO_CONTENT.into_response()
}

async fn serve(app: Router) -> String {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0)); // Random port
    let listener = TcpListener::bind(addr).await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

/// Starts the mock backend and returns its base URL.
pub async fn spawn_backend(db: Shared) -> String {
    let app = Router::new()
        .route(
            "/rest/v1/User",
            get(list_users).post(create_user).patch(patch_user),
        )
        .with_state(db);
    serve(app).await
}

/// A backend that answers every read with a body that is not JSON.
pub async fn spawn_garbage_backend() -> String {
    let app = Router::new().route("/rest/v1/User", get(|| async { "<html>oops</html>" }));
    serve(app).await
}
