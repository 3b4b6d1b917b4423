//! In-process stand-in for the REST backend.

use std::sync::{Arc, Mutex};

use api_types::{EntryId, FinancialEntry, FinancialEntryNew};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::{get, put},
};

pub fn entry(value: serde_json::Value) -> FinancialEntry {
    serde_json::from_value(value).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Default)]
struct Store {
    entries: Vec<FinancialEntry>,
    next_id: u64,
    requests: Vec<Recorded>,
    fail: bool,
}

impl Store {
    fn record(&mut self, method: Method, path: String, body: Option<serde_json::Value>) {
        self.requests.push(Recorded { method, path, body });
    }
}

type Shared = Arc<Mutex<Store>>;

#[derive(Clone)]
pub struct FakeBackend {
    store: Shared,
    base_url: String,
}

impl FakeBackend {
    pub async fn start(entries: Vec<FinancialEntry>) -> Self {
        let store = Arc::new(Mutex::new(Store {
            next_id: entries.len() as u64 + 1,
            entries,
            ..Store::default()
        }));

        let router = Router::new()
            .route("/financialEntries", get(list).post(create))
            .route("/financialEntries/{id}", put(update).delete(remove))
            .with_state(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            store,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Makes every following request answer 500.
    pub fn fail_requests(&self, fail: bool) {
        self.store.lock().unwrap().fail = fail;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.store.lock().unwrap().requests.clone()
    }

    pub fn entries(&self) -> Vec<FinancialEntry> {
        self.store.lock().unwrap().entries.clone()
    }
}

async fn list(State(store): State<Shared>) -> Result<Json<Vec<FinancialEntry>>, StatusCode> {
    let mut store = store.lock().unwrap();
    store.record(Method::GET, "/financialEntries".to_string(), None);
    if store.fail {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(store.entries.clone()))
}

async fn create(
    State(store): State<Shared>,
    Json(body): Json<FinancialEntryNew>,
) -> Result<(StatusCode, Json<FinancialEntry>), StatusCode> {
    let mut store = store.lock().unwrap();
    store.record(
        Method::POST,
        "/financialEntries".to_string(),
        serde_json::to_value(&body).ok(),
    );
    if store.fail {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let id = EntryId::Number(store.next_id);
    store.next_id += 1;
    let created = FinancialEntry::from_new(id, body);
    store.entries.push(created.clone());
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<FinancialEntry>,
) -> StatusCode {
    let mut store = store.lock().unwrap();
    store.record(
        Method::PUT,
        format!("/financialEntries/{id}"),
        serde_json::to_value(&body).ok(),
    );
    if store.fail {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    match store.entries.iter_mut().find(|e| e.id.to_string() == id) {
        Some(stored) => {
            *stored = body;
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn remove(State(store): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut store = store.lock().unwrap();
    store.record(Method::DELETE, format!("/financialEntries/{id}"), None);
    if store.fail {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    let before = store.entries.len();
    store.entries.retain(|e| e.id.to_string() != id);
    if store.entries.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}
