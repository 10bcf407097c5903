//! In-process stand-in for the REST backend.
//!
//! Every request is recorded. Responses are scripted per `METHOD /path`:
//! queued replies are served in order and the last one repeats. Unscripted
//! routes answer 404.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use pawsconnect::{ApiClient, ClientConfig, KeyValueStore, MemoryStore};
use serde_json::{Value, json};

#[derive(Clone, Debug)]
pub struct Hit {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Hit {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
pub struct MockBackend {
    hits: Mutex<Vec<Hit>>,
    replies: Mutex<HashMap<(Method, String), VecDeque<(StatusCode, Value)>>>,
}

impl MockBackend {
    /// Queue a reply for `method path` (path includes the `/api` prefix).
    pub fn reply(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.replies.lock().unwrap().entry((method, path.to_owned())).or_default().push_back((status, body));
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hits_to(&self, method: &Method, path: &str) -> Vec<Hit> {
        self.hits().into_iter().filter(|hit| &hit.method == method && hit.path == path).collect()
    }

    fn next_reply(&self, method: &Method, path: &str) -> (StatusCode, Value) {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(&(method.clone(), path.to_owned())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => (StatusCode::NOT_FOUND, json!({ "error": "not found" })),
        }
    }
}

async fn handle(State(mock): State<Arc<MockBackend>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let hit = Hit {
        method: parts.method.clone(),
        path: parts.uri.path().to_owned(),
        query: parts.uri.query().map(str::to_owned),
        authorization: header_text(&parts.headers, header::AUTHORIZATION),
        content_type: header_text(&parts.headers, header::CONTENT_TYPE),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    };
    let (status, reply) = mock.next_reply(&hit.method, &hit.path);
    mock.hits.lock().unwrap().push(hit);
    (status, axum::Json(reply)).into_response()
}

fn header_text(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers.get(name).and_then(|value| value.to_str().ok()).map(str::to_owned)
}

/// Start the backend on an ephemeral port; returns it with its `/api` base URL.
pub async fn start() -> (Arc<MockBackend>, String) {
    let mock = Arc::new(MockBackend::default());
    let app = Router::new().fallback(handle).with_state(mock.clone());
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (mock, format!("http://{addr}/api"))
}

pub fn client(base_url: &str, store: Arc<MemoryStore>) -> ApiClient {
    let config = ClientConfig { api_base_url: base_url.to_owned(), ..ClientConfig::default() };
    let store: Arc<dyn KeyValueStore> = store;
    ApiClient::new(&config, store).unwrap()
}

pub fn user_json(id: &str, username: &str, is_staff: bool) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "first_name": "Ada",
        "last_name": "Lovelace",
        "is_active": true,
        "is_staff": is_staff,
    })
}

pub fn donation_json(id: &str, amount: &str, status: &str) -> Value {
    json!({
        "id": id,
        "amount": amount,
        "status": status,
        "is_manual": true,
        "payment_method": "bank_transfer",
        "receipt_image": format!("receipts/{id}.png"),
        "post": { "id": "p1", "title": "Help Bella", "type": "donation" },
        "donor": user_json("u2", "grace", false),
        "created_at": "2024-03-05T10:30:00Z",
    })
}

/// A product as the backend serializes it: `store` is the store's name.
pub fn product_json(id: &str, name: &str, store: &str, category: &str, stock: &str) -> Value {
    json!({
        "id": id,
        "store": store,
        "name": name,
        "description": "",
        "category": category,
        "price": "12.50",
        "stock_quantity": stock,
        "image": "",
        "is_active": true,
        "created_at": "2024-03-01T09:00:00Z",
        "updated_at": "2024-03-01T09:00:00Z",
    })
}
