//! Shared helpers for API integration tests.
//!
//! Builds the full application router with the same middleware stack as
//! `main.rs`, wired to a local stub gateway on an ephemeral port that
//! serves a scripted sequence of responses.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use formsight_api::config::{GatewaySettings, ServerConfig};
use formsight_api::routes;
use formsight_api::state::AppState;

// ---------------------------------------------------------------------------
// Stub gateway
// ---------------------------------------------------------------------------

/// One scripted stub response: a status code and a JSON body.
#[derive(Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub body: Value,
}

impl StubReply {
    /// A 200 chat completion whose reply text is `content`.
    pub fn completion(content: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({
                "choices": [{ "message": { "role": "assistant", "content": content } }]
            }),
        }
    }

    /// A bare status with a scripted error body.
    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: json!({ "error": "scripted failure" }),
        }
    }
}

/// Handle to a running stub gateway.
#[derive(Clone)]
pub struct StubGateway {
    /// Chat-completions endpoint URL.
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl StubGateway {
    /// Number of attempts the stub has served.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct StubState {
    script: Arc<Mutex<VecDeque<StubReply>>>,
    hits: Arc<AtomicUsize>,
}

async fn stub_handler(State(state): State<StubState>) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let reply = state
        .script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| StubReply::status(StatusCode::INTERNAL_SERVER_ERROR));
    (reply.status, Json(reply.body))
}

/// Spawn a stub gateway serving `script` in order.
pub async fn spawn_stub_gateway(script: Vec<StubReply>) -> StubGateway {
    let state = StubState {
        script: Arc::new(Mutex::new(script.into())),
        hits: Arc::new(AtomicUsize::new(0)),
    };
    let hits = Arc::clone(&state.hits);

    let app = Router::new()
        .route("/v1/chat/completions", post(stub_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubGateway {
        url: format!("http://{addr}/v1/chat/completions"),
        hits,
    }
}

// ---------------------------------------------------------------------------
// Application under test
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` pointed at the given gateway endpoint.
pub fn test_config(gateway_url: &str, api_key: Option<&str>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        gateway: GatewaySettings {
            url: gateway_url.to_string(),
            api_key: api_key.map(str::to_string),
            model: "google/gemini-2.5-flash".to_string(),
            request_timeout_secs: 5,
        },
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(config: ServerConfig) -> Router {
    let request_timeout_secs = config.request_timeout_secs;
    let state = AppState::from_config(config);

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Build an app whose gateway serves the given script with a credential
/// configured. Returns the app and the stub handle.
pub async fn app_with_stub(script: Vec<StubReply>) -> (Router, StubGateway) {
    let stub = spawn_stub_gateway(script).await;
    let app = build_test_app(test_config(&stub.url, Some("test-key")));
    (app, stub)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
