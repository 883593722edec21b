// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the Kubernetes API server.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// An in-memory API server that stores objects by their REST path.
///
/// GET, POST, PUT and DELETE behave like the real API server for single
/// objects: uids and resource versions are assigned, and a PUT with a stale
/// resourceVersion is rejected with 409. Canned responses registered with
/// `on_get`/`on_put` take precedence over the stored state.
#[derive(Clone, Default)]
pub struct MockApiServer {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    objects: BTreeMap<String, Value>,
    responses: HashMap<(String, String), (u16, String)>,
    requests: Vec<(String, String)>,
    revision: u64,
}

impl State {
    fn next_revision(&mut self) -> String {
        self.revision += 1;
        self.revision.to_string()
    }
}

impl MockApiServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail GET requests for the exact path with the given status and reason
    pub fn on_get(self, path: &str, status: u16, reason: &str) -> Self {
        self.respond("GET", path, status, status_json(status, reason, path))
    }

    /// Fail PUT requests for the exact path with the given status and reason
    pub fn on_put(self, path: &str, status: u16, reason: &str) -> Self {
        self.respond("PUT", path, status, status_json(status, reason, path))
    }

    fn respond(self, method: &str, path: &str, status: u16, body: String) -> Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert((method.to_string(), path.to_string()), (status, body));
        self
    }

    /// Build a kube Client backed by this server
    pub fn client(&self) -> Client {
        Client::new(self.clone(), "default")
    }

    /// Store an object as if it had been created by another actor
    pub fn insert(&self, path: &str, mut object: Value) {
        let mut state = self.state.lock().unwrap();
        admit(&mut state, path, &mut object, None);
        state.objects.insert(path.to_string(), object);
    }

    /// Modify a stored object as another actor would
    pub fn update(&self, path: &str, f: impl FnOnce(&mut Value)) {
        let mut state = self.state.lock().unwrap();
        let Some(mut object) = state.objects.get(path).cloned() else {
            panic!("no object stored at {}", path);
        };
        f(&mut object);
        object["metadata"]["resourceVersion"] = state.next_revision().into();
        state.objects.insert(path.to_string(), object);
    }

    pub fn remove(&self, path: &str) -> Option<Value> {
        self.state.lock().unwrap().objects.remove(path)
    }

    pub fn object(&self, path: &str) -> Option<Value> {
        self.state.lock().unwrap().objects.get(path).cloned()
    }

    /// Number of requests received that could modify state
    pub fn write_count(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|(method, _)| method != "GET")
            .count()
    }

    fn handle(&self, method: &str, path: &str, body: &[u8]) -> (u16, String) {
        let mut state = self.state.lock().unwrap();
        state.requests.push((method.to_string(), path.to_string()));

        if let Some(resp) = state.responses.get(&(method.to_string(), path.to_string())) {
            return resp.clone();
        }

        match method {
            "GET" => match state.objects.get(path) {
                Some(object) => (200, object.to_string()),
                None => (404, not_found_json(path)),
            },
            "POST" => {
                let Ok(mut object) = serde_json::from_slice::<Value>(body) else {
                    return (400, status_json(400, "BadRequest", path));
                };
                let Some(name) = object["metadata"]["name"].as_str().map(str::to_string) else {
                    return (422, status_json(422, "Invalid", path));
                };
                let object_path = format!("{}/{}", path, name);
                if state.objects.contains_key(&object_path) {
                    return (409, status_json(409, "AlreadyExists", &object_path));
                }
                admit(&mut state, &object_path, &mut object, None);
                state.objects.insert(object_path, object.clone());
                (201, object.to_string())
            }
            "PUT" => {
                let Ok(mut object) = serde_json::from_slice::<Value>(body) else {
                    return (400, status_json(400, "BadRequest", path));
                };
                let Some(stored) = state.objects.get(path).cloned() else {
                    return (404, not_found_json(path));
                };
                let sent = &object["metadata"]["resourceVersion"];
                if !sent.is_null() && *sent != stored["metadata"]["resourceVersion"] {
                    return (409, status_json(409, "Conflict", path));
                }
                admit(&mut state, path, &mut object, Some(&stored));
                state.objects.insert(path.to_string(), object.clone());
                (200, object.to_string())
            }
            "DELETE" => match state.objects.remove(path) {
                Some(object) => (200, object.to_string()),
                None => (404, not_found_json(path)),
            },
            _ => (405, status_json(405, "MethodNotAllowed", path)),
        }
    }
}

/// Fill in server-owned metadata on an object about to be stored
fn admit(state: &mut State, path: &str, object: &mut Value, stored: Option<&Value>) {
    let uid = stored
        .map(|s| s["metadata"]["uid"].clone())
        .filter(|uid| !uid.is_null())
        .unwrap_or_else(|| format!("uid-{}", path).into());
    let revision = state.next_revision();

    let metadata = &mut object["metadata"];
    if metadata["uid"].is_null() {
        metadata["uid"] = uid;
    }
    if metadata["namespace"].is_null() {
        if let Some(ns) = namespace_of(path) {
            metadata["namespace"] = ns.into();
        }
    }
    metadata["resourceVersion"] = revision.into();
}

fn namespace_of(path: &str) -> Option<&str> {
    let mut segments = path.split('/');
    segments.find(|s| *s == "namespaces")?;
    segments.next()
}

impl Service<Request<Body>> for MockApiServer {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let server = self.clone();

        Box::pin(async move {
            let method = req.method().to_string();
            let path = req.uri().path().to_string();
            let body = req.into_body().collect().await?.to_bytes();

            let (status, body) = server.handle(&method, &path, &body);

            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))?)
        })
    }
}

/// Create a mock Simple JSON object
pub fn simple_json(name: &str, namespace: &str, foo: &str) -> Value {
    serde_json::json!({
        "apiVersion": "simple.atlas.fis.dev/v1alpha1",
        "kind": "Simple",
        "metadata": {
            "name": name,
            "namespace": namespace
        },
        "spec": {
            "foo": foo
        }
    })
}

/// Create a mock ConfigMap JSON object
pub fn config_map_json(name: &str, namespace: &str, data: &[(&str, &str)]) -> Value {
    let mut cm = serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": name,
            "namespace": namespace
        }
    });
    if !data.is_empty() {
        let data: BTreeMap<&str, &str> = data.iter().copied().collect();
        cm["data"] = serde_json::json!(data);
    }
    cm
}

/// Create a Status response body
pub fn status_json(code: u16, reason: &str, path: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} {}", reason, path),
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(path: &str) -> String {
    status_json(404, "NotFound", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_of_path() {
        assert_eq!(
            namespace_of("/api/v1/namespaces/team-a/configmaps/app"),
            Some("team-a")
        );
        assert_eq!(namespace_of("/api/v1/nodes/n1"), None);
    }

    #[test]
    fn test_insert_assigns_server_metadata() {
        let server = MockApiServer::new();
        server.insert("/api/v1/namespaces/ns/configmaps/a", config_map_json("a", "ns", &[]));

        let stored = server.object("/api/v1/namespaces/ns/configmaps/a").unwrap();
        assert!(stored["metadata"]["uid"].is_string());
        assert!(stored["metadata"]["resourceVersion"].is_string());
    }

    #[test]
    fn test_stale_put_is_rejected() {
        let server = MockApiServer::new();
        let path = "/api/v1/namespaces/ns/configmaps/a";
        server.insert(path, config_map_json("a", "ns", &[]));
        let mut stale = server.object(path).unwrap();
        server.update(path, |cm| cm["data"] = serde_json::json!({"k": "v"}));
        stale["data"] = serde_json::json!({"k": "mine"});

        let (status, _) = server.handle("PUT", path, stale.to_string().as_bytes());

        assert_eq!(status, 409);
        assert_eq!(server.object(path).unwrap()["data"]["k"], "v");
    }
}
