//! In-process mock backend for HTTP-level tests.
//!
//! Routes are canned `(status, body)` queues keyed by method and path. Each
//! call pops the front response until one remains, which then repeats. Every
//! request is recorded so tests can assert paths, queries and bodies.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::api::ApiClient;
use crate::config::{DashboardConfig, Timeouts};
use crate::session::{SHOP_OWNER_ROLE, Session};

pub(crate) const TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub content_type: String,
    pub authorization: String,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct Inner {
    routes: HashMap<(String, String), VecDeque<(u16, String)>>,
    calls: Vec<Recorded>,
}

#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response for `method path`.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.on_raw(method, path, status, &body.to_string())
    }

    /// Queue a raw (possibly empty) response body.
    pub fn on_raw(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        inner
            .routes
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.calls().into_iter().filter(|c| c.method == method && c.path == path).collect()
    }

    /// Bind on an ephemeral port and return the base URL.
    pub async fn start(&self) -> String {
        let router = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("mock backend failed");
        });
        format!("http://{addr}")
    }
}

async fn handle(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    let call = Recorded {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        content_type: header("content-type"),
        authorization: header("authorization"),
        body: String::from_utf8_lossy(&body).into_owned(),
    };

    let mut inner = backend.inner.lock().unwrap();
    inner.calls.push(call);
    let key = (method.as_str().to_string(), uri.path().to_string());
    let Some(queue) = inner.routes.get_mut(&key) else {
        return (StatusCode::NOT_FOUND, r#"{"detail":"Not Found"}"#).into_response();
    };
    let (status, body) = if queue.len() > 1 { queue.pop_front().unwrap() } else { queue.front().cloned().unwrap() };
    (StatusCode::from_u16(status).unwrap(), [("content-type", "application/json")], body).into_response()
}

pub(crate) fn config(base_url: &str) -> DashboardConfig {
    DashboardConfig {
        api_url: base_url.to_string(),
        session_file: PathBuf::from("unused-session.json"),
        timeouts: Timeouts { request_secs: 5, connect_secs: 2 },
        page_limit: 50,
    }
}

pub(crate) fn owner_session() -> Session {
    Session { token: TOKEN.into(), id: "7".into(), role: SHOP_OWNER_ROLE.into() }
}

/// Client without a session.
pub(crate) fn anonymous_client(base_url: &str) -> ApiClient {
    ApiClient::new(&config(base_url)).unwrap()
}

/// Client authorized as the shop owner.
pub(crate) fn client(base_url: &str) -> ApiClient {
    anonymous_client(base_url).with_session(&owner_session())
}
