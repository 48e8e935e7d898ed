#![allow(dead_code)]
//! Shared test doubles: a scripted in-memory `ObjectService` and an HTTP
//! backend speaking the `{ success, ... }` envelope contract.

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Body,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use object_browser::{
    errors::{OperationError, OperationResult},
    models::{object::ObjectRecord, upload::UploadFile},
    services::{
        controller::{Confirm, OperationController},
        remote::{ObjectService, encode_key},
    },
};
use parking_lot::Mutex;
use reqwest::Url;
use serde_json::json;
use std::{collections::VecDeque, sync::Arc, time::Duration};
use tokio::net::TcpListener;

pub const NOTICE_TTL: Duration = Duration::from_secs(5);

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_740_000_000 + secs, 0).unwrap()
}

pub fn record(key: &str, size: u64) -> ObjectRecord {
    ObjectRecord {
        key: key.to_string(),
        last_modified: at(size as i64),
        size,
        etag: format!("etag-{key}"),
    }
}

pub fn keys(objects: &[ObjectRecord]) -> Vec<String> {
    objects.iter().map(|o| o.key.clone()).collect()
}

// =============================================================================
// Scripted service
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Upload,
    Download,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Upload(String),
    Download(String),
    Delete(String),
}

/// In-memory remote that records every call and can be told to fail or
/// to answer listings after a delay.
#[derive(Default)]
pub struct ScriptedService {
    objects: Mutex<Vec<ObjectRecord>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Vec<(Op, OperationError)>>,
    listings: Mutex<VecDeque<(Duration, Vec<ObjectRecord>)>>,
}

impl ScriptedService {
    pub fn with_objects(objects: Vec<ObjectRecord>) -> Arc<Self> {
        let service = Self::default();
        *service.objects.lock() = objects;
        Arc::new(service)
    }

    pub fn empty() -> Arc<Self> {
        Self::with_objects(Vec::new())
    }

    /// Make the next call of `op` fail with `err`.
    pub fn fail_next(&self, op: Op, err: OperationError) {
        self.failures.lock().push((op, err));
    }

    /// Answer the next listing with `objects` after `delay`.
    pub fn script_listing(&self, delay: Duration, objects: Vec<ObjectRecord>) {
        self.listings.lock().push_back((delay, objects));
    }

    pub fn set_objects(&self, objects: Vec<ObjectRecord>) {
        *self.objects.lock() = objects;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn list_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, Call::List))
            .count()
    }

    fn record_call(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn take_failure(&self, op: Op) -> OperationResult<()> {
        let mut failures = self.failures.lock();
        match failures.iter().position(|(o, _)| *o == op) {
            Some(idx) => Err(failures.remove(idx).1),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ObjectService for ScriptedService {
    async fn list(&self) -> OperationResult<Vec<ObjectRecord>> {
        self.record_call(Call::List);
        let scripted = self.listings.lock().pop_front();
        if let Some((delay, objects)) = scripted {
            tokio::time::sleep(delay).await;
            return Ok(objects);
        }
        self.take_failure(Op::List)?;
        Ok(self.objects.lock().clone())
    }

    async fn upload(&self, file: &UploadFile) -> OperationResult<Option<String>> {
        self.record_call(Call::Upload(file.name.clone()));
        self.take_failure(Op::Upload)?;
        let mut objects = self.objects.lock();
        objects.retain(|o| o.key != file.name);
        objects.push(record(&file.name, file.len() as u64));
        Ok(Some("File uploaded successfully".into()))
    }

    async fn download(&self, key: &str) -> OperationResult<Bytes> {
        self.record_call(Call::Download(key.to_string()));
        self.take_failure(Op::Download)?;
        if self.objects.lock().iter().any(|o| o.key == key) {
            Ok(Bytes::from(format!("contents of {key}")))
        } else {
            Err(OperationError::Server("File not found".into()))
        }
    }

    async fn delete(&self, key: &str) -> OperationResult<()> {
        self.record_call(Call::Delete(key.to_string()));
        self.take_failure(Op::Delete)?;
        self.objects.lock().retain(|o| o.key != key);
        Ok(())
    }

    fn resource_url(&self, key: &str) -> String {
        format!("http://fake/download/{}", encode_key(key))
    }
}

/// Fixed answer that remembers every prompt it was shown.
pub struct RecordingConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl RecordingConfirm {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Confirm for RecordingConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().push(prompt.to_string());
        self.answer
    }
}

pub fn controller_with(
    service: Arc<ScriptedService>,
    confirm: Arc<dyn Confirm>,
) -> OperationController {
    OperationController::new(service, confirm, NOTICE_TTL)
}

// =============================================================================
// HTTP backend
// =============================================================================

#[derive(Default)]
pub struct Backend {
    objects: Mutex<Vec<(ObjectRecord, Bytes)>>,
    /// When set, `/files` answers `{ success: false, error }`.
    pub list_error: Mutex<Option<String>>,
    /// When set, `/files` answers with a non-JSON body.
    pub list_garbage: Mutex<bool>,
    /// When set, `/files` answers `{ success: true }` with no `files` array.
    pub list_without_files: Mutex<bool>,
}

impl Backend {
    pub fn insert(&self, key: &str, bytes: &[u8], modified: DateTime<Utc>) {
        let bytes = Bytes::copy_from_slice(bytes);
        let record = ObjectRecord {
            key: key.to_string(),
            last_modified: modified,
            size: bytes.len() as u64,
            etag: format!("\"{:x}\"", md5::compute(&bytes)),
        };
        let mut objects = self.objects.lock();
        objects.retain(|(o, _)| o.key != key);
        objects.push((record, bytes));
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().iter().map(|(o, _)| o.key.clone()).collect()
    }

    pub fn content(&self, key: &str) -> Option<Bytes> {
        self.objects
            .lock()
            .iter()
            .find(|(o, _)| o.key == key)
            .map(|(_, b)| b.clone())
    }
}

/// Start the backend on an ephemeral port. Returns its base URL.
pub async fn spawn_backend(backend: Arc<Backend>) -> Url {
    let app = Router::new()
        .route("/files", get(list_files))
        .route("/upload", post(upload_file))
        .route("/download/{key}", get(download_file))
        .route("/delete/{key}", delete(delete_file))
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

/// A URL nothing listens on.
pub async fn dead_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

async fn list_files(State(backend): State<Arc<Backend>>) -> Response {
    if *backend.list_garbage.lock() {
        return (StatusCode::BAD_GATEWAY, "<html>upstream down</html>").into_response();
    }
    if *backend.list_without_files.lock() {
        return Json(json!({ "success": true })).into_response();
    }
    if let Some(error) = backend.list_error.lock().clone() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": error })),
        )
            .into_response();
    }
    let files: Vec<ObjectRecord> = backend
        .objects
        .lock()
        .iter()
        .map(|(o, _)| o.clone())
        .collect();
    Json(json!({ "success": true, "files": files })).into_response()
}

async fn upload_file(State(backend): State<Arc<Backend>>, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("unnamed").to_string();
        let Ok(bytes) = field.bytes().await else {
            break;
        };
        backend.insert(&name, &bytes, Utc::now());
        return Json(json!({ "success": true, "message": "File uploaded successfully" }))
            .into_response();
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": "No file uploaded" })),
    )
        .into_response()
}

async fn download_file(State(backend): State<Arc<Backend>>, Path(key): Path<String>) -> Response {
    match backend.content(&key) {
        Some(bytes) => Response::builder()
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(Body::from(bytes))
            .unwrap(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("File {key} not found") })),
        )
            .into_response(),
    }
}

async fn delete_file(State(backend): State<Arc<Backend>>, Path(key): Path<String>) -> Response {
    let mut objects = backend.objects.lock();
    let before = objects.len();
    objects.retain(|(o, _)| o.key != key);
    if objects.len() < before {
        Json(json!({ "success": true })).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "File not found" })),
        )
            .into_response()
    }
}
