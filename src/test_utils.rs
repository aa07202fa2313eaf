// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses and store failures.

use crate::error::StoreError;
use crate::metrics::GaugeSink;
use crate::store::{ConnectionCatalog, MemoryStore, OutpostDefaults, OutpostFilter, OutpostStore};
use crate::types::{Outpost, ServiceConnectionKind, ServiceConnectionRef};
use async_trait::async_trait;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for requests with the given method matching the exact path
    pub fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Method and path of every request received so far, in order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Whether a request with this method and path was received
    pub fn received(&self, method: &str, path: &str) -> bool {
        self.requests()
            .iter()
            .any(|(m, p)| m == method && p == path)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "authentik")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json("resource", &path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// An Outpost object as returned by the API server
pub fn outpost_json(name: &str, uid: &str, display_name: &str, managed: &str) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "goauthentik.io/v1",
        "kind": "Outpost",
        "metadata": {
            "name": name,
            "namespace": "authentik",
            "uid": uid,
            "resourceVersion": "1"
        },
        "spec": {
            "name": display_name,
            "type": "proxy",
            "managed": managed
        }
    })
}

pub fn outpost_list_json(items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": "goauthentik.io/v1",
        "kind": "OutpostList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// A list of service connections of one kind, with placeholder specs
pub fn connection_list_json(kind: &str, names: &[&str]) -> String {
    let items: Vec<serde_json::Value> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "apiVersion": "goauthentik.io/v1",
                "kind": kind,
                "metadata": { "name": name, "namespace": "authentik", "uid": format!("uid-{}", name) },
                "spec": { "local": true, "url": "unix:///var/run/docker.sock" }
            })
        })
        .collect();

    serde_json::json!({
        "apiVersion": "goauthentik.io/v1",
        "kind": format!("{}List", kind),
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

pub fn status_success_json() -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Success",
        "code": 200
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Create a 409 already exists response
pub fn conflict_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" already exists", resource, name),
        "reason": "AlreadyExists",
        "code": 409
    })
    .to_string()
}

/// Store operation a `FailingStore` rejects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    FindOne,
    Upsert,
    Save,
    DeleteAll,
    FirstOf,
}

/// Delegates to a `MemoryStore` but fails one kind of operation
pub struct FailingStore {
    pub inner: Arc<MemoryStore>,
    fail_on: FailOn,
}

impl FailingStore {
    pub fn new(inner: Arc<MemoryStore>, fail_on: FailOn) -> Self {
        Self { inner, fail_on }
    }

    fn check(&self, op: FailOn) -> Result<(), StoreError> {
        if self.fail_on == op {
            return Err(StoreError::Unavailable(format!("injected failure on {:?}", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl OutpostStore for FailingStore {
    async fn find_one(&self, filter: &OutpostFilter) -> Result<Option<Outpost>, StoreError> {
        self.check(FailOn::FindOne)?;
        self.inner.find_one(filter).await
    }

    async fn upsert(
        &self,
        managed: &str,
        defaults: &OutpostDefaults,
    ) -> Result<(Outpost, bool), StoreError> {
        self.check(FailOn::Upsert)?;
        self.inner.upsert(managed, defaults).await
    }

    async fn save(&self, outpost: &Outpost) -> Result<(), StoreError> {
        self.check(FailOn::Save)?;
        self.inner.save(outpost).await
    }

    async fn delete_all(&self, filter: &OutpostFilter) -> Result<usize, StoreError> {
        self.check(FailOn::DeleteAll)?;
        self.inner.delete_all(filter).await
    }
}

#[async_trait]
impl ConnectionCatalog for FailingStore {
    async fn first_of(
        &self,
        kind: ServiceConnectionKind,
    ) -> Result<Option<ServiceConnectionRef>, StoreError> {
        self.check(FailOn::FirstOf)?;
        self.inner.first_of(kind).await
    }
}

/// Gauge value recorded by a `RecordingSink`
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSample {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

/// Collects every gauge write for assertions
#[derive(Default, Clone)]
pub struct RecordingSink {
    samples: Arc<Mutex<Vec<GaugeSample>>>,
}

impl RecordingSink {
    pub fn samples(&self) -> Vec<GaugeSample> {
        self.samples.lock().unwrap().clone()
    }
}

impl GaugeSink for RecordingSink {
    fn set_gauge(&self, name: &'static str, labels: &[(&'static str, String)], value: f64) {
        self.samples.lock().unwrap().push(GaugeSample {
            name: name.to_string(),
            labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            value,
        });
    }
}
