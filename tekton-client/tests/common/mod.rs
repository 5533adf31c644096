//! In-process mock of the Tekton pipeline API
//!
//! Every request is recorded; responses are served from a queue filled by
//! the test before the call is made.

#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tekton_client::TektonPipelineClient;

pub const PIPELINE_ID: &str = "94619026-912b-4d92-8f51-6c74f0692d90";
pub const RUN_ID: &str = "bf4b3abd-0c93-416b-911e-9cf42f1a1085";
pub const TRIGGER_ID: &str = "1bb892a1-2e04-4768-a369-b1159eace147";
pub const DEFINITION_ID: &str = "94299034-d45f-4e9a-8ed5-6bd5c7bb7ada";
pub const TOOLCHAIN_ID: &str = "bf5fa00f-ddef-4298-b87b-aa8b6da0e1a6";

const API_BASE: &str = "https://api.example.com/pipeline/v2";

/// A request received by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Request body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    /// Decoded query parameters, in order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let query = self.query.as_deref().unwrap_or_default();
        reqwest::Url::parse(&format!("http://localhost/?{}", query))
            .expect("query parses")
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct QueuedResponse {
    status: StatusCode,
    body: Option<Value>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct MockState {
    requests: Vec<RecordedRequest>,
    responses: VecDeque<QueuedResponse>,
}

type SharedState = Arc<Mutex<MockState>>;

pub struct MockServer {
    url: String,
    state: SharedState,
}

impl MockServer {
    /// Start a server on an ephemeral port
    pub async fn start() -> Self {
        let state = SharedState::default();
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server stopped");
        });

        Self {
            url: format!("http://{}/pipeline/v2", addr),
            state,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn client(&self) -> TektonPipelineClient {
        TektonPipelineClient::new(self.url.clone())
    }

    /// Queue a JSON response
    pub fn respond(&self, status: u16, body: Value) {
        self.enqueue(status, Some(body), None);
    }

    /// Queue a response without a body
    pub fn respond_empty(&self, status: u16) {
        self.enqueue(status, None, None);
    }

    /// Queue a JSON response that is held back for `delay`
    pub fn respond_after(&self, delay: Duration, status: u16, body: Value) {
        self.enqueue(status, Some(body), Some(delay));
    }

    fn enqueue(&self, status: u16, body: Option<Value>, delay: Option<Duration>) {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(QueuedResponse { status, body, delay });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was received")
    }
}

async fn record(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let queued = {
        let mut state = state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers,
            body,
        });
        state.responses.pop_front()
    };

    let Some(queued) = queued else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "no response queued").into_response();
    };
    if let Some(delay) = queued.delay {
        tokio::time::sleep(delay).await;
    }

    match queued.body {
        Some(body) => (
            queued.status,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response(),
        None => queued.status.into_response(),
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn property_json(name: &str, value: &str) -> Value {
    json!({
        "name": name,
        "value": value,
        "type": "text",
        "href": format!("{}/tekton_pipelines/{}/properties/{}", API_BASE, PIPELINE_ID, name)
    })
}

pub fn trigger_json() -> Value {
    json!({
        "type": "manual",
        "id": TRIGGER_ID,
        "name": "Manual Trigger",
        "href": format!("{}/tekton_pipelines/{}/triggers/{}", API_BASE, PIPELINE_ID, TRIGGER_ID),
        "event_listener": "listener",
        "properties": [property_json("branch", "main")],
        "tags": ["manual"],
        "max_concurrent_runs": 3,
        "enabled": true,
        "favorite": false
    })
}

pub fn definition_json() -> Value {
    json!({
        "id": DEFINITION_ID,
        "href": format!(
            "{}/tekton_pipelines/{}/definitions/{}",
            API_BASE, PIPELINE_ID, DEFINITION_ID
        ),
        "source": {
            "type": "git",
            "properties": {
                "url": "https://github.com/open-toolchain/hello-tekton.git",
                "branch": "main",
                "path": ".tekton",
                "tool": { "id": "2d1b4d4e-a8b0-4b86-8a0f-4a8b0f4f9bf1" }
            }
        }
    })
}

pub fn pipeline_json() -> Value {
    json!({
        "id": PIPELINE_ID,
        "name": "hello-tekton",
        "status": "configured",
        "resource_group": { "id": "6a9a01f2cff54a7f966f803d92877123" },
        "toolchain": {
            "id": TOOLCHAIN_ID,
            "crn": format!(
                "crn:v1:staging:public:toolchain:us-south:a/0ba224679d6c697f9baee5e14ade83ac:{}::",
                TOOLCHAIN_ID
            )
        },
        "definitions": [definition_json()],
        "properties": [property_json("env", "dev")],
        "triggers": [trigger_json()],
        "worker": { "id": "public", "name": "IBM Managed workers", "type": "public" },
        "runs_url": "https://cloud.ibm.com/devops/pipelines/tekton/94619026?env_id=ibm:yp:us-south",
        "href": format!("{}/tekton_pipelines/{}", API_BASE, PIPELINE_ID),
        "build_number": 7,
        "enable_notifications": false,
        "enable_partial_cloning": false,
        "enabled": true,
        "created_at": "2024-06-18T14:08:02.169Z",
        "updated_at": "2024-06-18T14:08:02.169Z"
    })
}

pub fn run_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "href": format!("{}/tekton_pipelines/{}/pipeline_runs/{}", API_BASE, PIPELINE_ID, id),
        "user_info": { "iam_id": "IBMid-1234", "sub": "dev@example.com" },
        "status": status,
        "definition_id": DEFINITION_ID,
        "worker": {
            "id": "public",
            "name": "IBM Managed workers",
            "agent_id": "a1",
            "service_id": "s1"
        },
        "pipeline_id": PIPELINE_ID,
        "listener_name": "listener",
        "trigger": trigger_json(),
        "event_params_blob": "{}",
        "properties": [property_json("env", "dev")],
        "created_at": "2024-06-18T14:10:00Z",
        "updated_at": "2024-06-18T14:12:00Z",
        "run_url": "https://cloud.ibm.com/devops/pipelines/tekton/94619026/runs/bf4b3abd"
    })
}

/// A page of runs; `next_start` adds a `next` link carrying that cursor
pub fn runs_page(ids: &[&str], next_start: Option<&str>) -> Value {
    let base = format!("{}/tekton_pipelines/{}/pipeline_runs", API_BASE, PIPELINE_ID);
    let mut page = json!({
        "pipeline_runs": ids.iter().map(|id| run_json(id, "succeeded")).collect::<Vec<_>>(),
        "limit": ids.len().max(1),
        "first": { "href": format!("{}?limit=2", base) }
    });
    if let Some(start) = next_start {
        page["next"] = json!({ "href": format!("{}?limit=2&start={}", base, start) });
    }
    page
}
