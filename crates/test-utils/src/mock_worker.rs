//! In-process stand-in for the worker service.
//!
//! Binds an axum server to an ephemeral localhost port, answers `/render`
//! and `/sample` the way the proof-of-concept worker does, records every
//! request body it sees, and can be switched into failure modes.

use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::fixtures;

/// How the mock worker answers.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerBehavior {
    /// Answer like the real worker.
    Respond,
    /// Answer with this HTTP status and a short error body.
    Status(u16),
    /// Sleep this long, then answer like the real worker.
    Delay(Duration),
    /// Answer 200 with a body that is not JSON.
    Garbage,
    /// Answer 200 with this exact JSON body.
    Fixed(Value),
}

#[derive(Default)]
struct Recorded {
    render_calls: AtomicUsize,
    sample_calls: AtomicUsize,
    bodies: Mutex<Vec<Value>>,
}

#[derive(Clone)]
struct MockState {
    behavior: Arc<Mutex<WorkerBehavior>>,
    recorded: Arc<Recorded>,
}

/// Running mock worker. The server shuts down when this is dropped.
pub struct MockWorker {
    addr: SocketAddr,
    state: MockState,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockWorker {
    /// Start a mock worker that answers normally.
    pub async fn start() -> Self {
        Self::with_behavior(WorkerBehavior::Respond).await
    }

    /// Start a mock worker with the given behaviour.
    pub async fn with_behavior(behavior: WorkerBehavior) -> Self {
        let state = MockState {
            behavior: Arc::new(Mutex::new(behavior)),
            recorded: Arc::new(Recorded::default()),
        };

        let app = Router::new()
            .route("/render", post(render_handler))
            .route("/sample", post(sample_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock worker");
        let addr = listener.local_addr().expect("Mock worker has no address");

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    rx.await.ok();
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: Some(tx),
        }
    }

    /// Base URL to configure a worker client with.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_behavior(&self, behavior: WorkerBehavior) {
        *self.state.behavior.lock().unwrap() = behavior;
    }

    pub fn render_calls(&self) -> usize {
        self.state.recorded.render_calls.load(Ordering::SeqCst)
    }

    pub fn sample_calls(&self) -> usize {
        self.state.recorded.sample_calls.load(Ordering::SeqCst)
    }

    /// Total requests received on any route.
    pub fn total_calls(&self) -> usize {
        self.render_calls() + self.sample_calls()
    }

    /// Request bodies received, oldest first.
    pub fn received_bodies(&self) -> Vec<Value> {
        self.state.recorded.bodies.lock().unwrap().clone()
    }
}

impl Drop for MockWorker {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// A base URL nothing is listening on.
///
/// Binds an ephemeral port and releases it immediately, so connecting is
/// refused rather than left to time out.
pub fn unreachable_url() -> String {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("Failed to bind probe socket");
    let port = listener
        .local_addr()
        .expect("Probe socket has no address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

async fn render_handler(State(state): State<MockState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.recorded.render_calls.fetch_add(1, Ordering::SeqCst);
    let variable = body
        .get("variable")
        .and_then(Value::as_str)
        .unwrap_or("TMP")
        .to_string();
    state.recorded.bodies.lock().unwrap().push(body);

    let mut reply = fixtures::render_response(&variable);
    reply["generated_at"] = json!(chrono::Utc::now().to_rfc3339());
    respond(&state, reply).await
}

async fn sample_handler(State(state): State<MockState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.recorded.sample_calls.fetch_add(1, Ordering::SeqCst);
    let lat = body.get("lat").and_then(Value::as_f64).unwrap_or(0.0);
    let lon = body.get("lon").and_then(Value::as_f64).unwrap_or(0.0);
    state.recorded.bodies.lock().unwrap().push(body);

    respond(&state, fixtures::sample_response(lat, lon)).await
}

async fn respond(state: &MockState, reply: Value) -> axum::response::Response {
    let behavior = state.behavior.lock().unwrap().clone();
    match behavior {
        WorkerBehavior::Respond => Json(reply).into_response(),
        WorkerBehavior::Delay(delay) => {
            tokio::time::sleep(delay).await;
            Json(reply).into_response()
        }
        WorkerBehavior::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({"error": "worker failure"}))).into_response()
        }
        WorkerBehavior::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
        WorkerBehavior::Fixed(body) => Json(body).into_response(),
    }
}
