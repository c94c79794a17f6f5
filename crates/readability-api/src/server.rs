//! HTTP service.
//!
//! A thin presentation layer over `readability-core`: each handler reads the
//! raw body, validates it once, runs the analysis and wraps the result in the
//! `{ <field>, message, status }` envelope clients expect.
//!
//! | Method | Path          | Field   |
//! |--------|---------------|---------|
//! | GET    | `/`           | HTML endpoint listing |
//! | GET    | `/health`     | -       |
//! | POST   | `/fkgl`       | `grade` |
//! | POST   | `/fres`       | `score` |
//! | POST   | `/word-count` | `count` |
//! | POST   | `/analyze`    | all of the above plus totals and averages |
//!
//! Rejected requests still answer `200 OK`; the failure is carried by
//! `status: "ERROR"` and `message` in the envelope.

use std::error::Error as StdError;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::State,
    http::{
        HeaderMap, HeaderValue, Method,
        header::{CONTENT_LENGTH, CONTENT_TYPE},
    },
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use http_body_util::LengthLimitError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use readability_core::readability::{AnalysisReport, Metric, analyze_text, format_two_decimals};
use readability_core::{Config, RequestError, RequestResult, request};

/// Outcome marker carried by every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The request was analysed.
    Ok,
    /// The request was rejected; `message` says why.
    Error,
}

/// JSON body returned by the POST endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Endpoint-specific fields.
    #[serde(flatten)]
    pub payload: T,
    /// `"OK"` or a description of the failure.
    pub message: String,
    /// Outcome of the request.
    pub status: Status,
}

impl<T> Envelope<T> {
    /// Successful response around `payload`.
    pub fn ok(payload: T) -> Self {
        Self {
            payload,
            message: "OK".to_string(),
            status: Status::Ok,
        }
    }

    /// Failed response; `payload` carries the endpoint's default values.
    pub fn error(payload: T, err: &RequestError) -> Self {
        Self {
            payload,
            message: err.to_string(),
            status: Status::Error,
        }
    }
}

/// Everything `POST /analyze` reports, rendered as strings like the metric endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    /// Flesch-Kincaid Grade Level.
    pub grade: String,
    /// Flesch Reading Ease Score.
    pub score: String,
    /// Number of words.
    pub count: String,
    /// Number of sentences.
    pub sentences: String,
    /// Total estimated syllables.
    pub syllables: String,
    /// Average words per sentence.
    pub words_per_sentence: String,
    /// Average syllables per word.
    pub syllables_per_word: String,
}

impl From<&AnalysisReport> for AnalysisPayload {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            grade: report.fkgl(),
            score: report.fres(),
            count: report.words.to_string(),
            sentences: report.sentences.to_string(),
            syllables: report.syllables.to_string(),
            words_per_sentence: format_two_decimals(report.words_per_sentence),
            syllables_per_word: format_two_decimals(report.syllables_per_word),
        }
    }
}

/// Immutable settings shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    input_limit: Option<usize>,
}

impl AppState {
    /// State with the given body size limit (`None` for unlimited).
    pub const fn new(input_limit: Option<usize>) -> Self {
        Self { input_limit }
    }
}

/// Build the router with CORS and request tracing from `config`.
pub fn build_router(config: &Config) -> anyhow::Result<Router> {
    let cors = cors_layer(config.cors_origins.as_deref())?;
    Ok(router(AppState::new(config.input_limit()))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Routes without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(homepage_handler))
        .route("/health", get(health_handler))
        .route("/fkgl", post(fkgl_handler))
        .route("/fres", post(fres_handler))
        .route("/word-count", post(word_count_handler))
        .route("/analyze", post(analyze_handler))
        .with_state(Arc::new(state))
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let app = build_router(config)?;
    let addr = config.bind_addr();

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local_addr = listener.local_addr().context("listener has no local address")?;
    info!(addr = %local_addr, input_limit = ?config.input_limit(), "readability-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("readability-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

fn cors_layer(origins: Option<&[String]>) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let Some(origins) = origins else {
        return Ok(layer.allow_origin(Any));
    };

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin in configuration: {origin:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

async fn homepage_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(homepage(state.input_limit))
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": Status::Ok }))
}

async fn fkgl_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    metric_response(Metric::Fkgl, &state, &headers, body).await
}

async fn fres_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    metric_response(Metric::Fres, &state, &headers, body).await
}

async fn word_count_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    metric_response(Metric::WordCount, &state, &headers, body).await
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let report = match analyze_body(&state, &headers, body).await {
        Ok(report) => report,
        Err(err) => return reject("analyze", &err, Map::new()),
    };

    info!(endpoint = "analyze", words = report.words, "request served");
    Json(Envelope::ok(AnalysisPayload::from(&report))).into_response()
}

async fn metric_response(
    metric: Metric,
    state: &AppState,
    headers: &HeaderMap,
    body: Body,
) -> Response {
    let report = match analyze_body(state, headers, body).await {
        Ok(report) => report,
        Err(err) => {
            return reject(metric.as_str(), &err, single_field(metric, "0".to_string()));
        }
    };

    let value = metric.render(&report);
    info!(endpoint = metric.as_str(), value = %value, "request served");
    Json(Envelope::ok(single_field(metric, value))).into_response()
}

async fn analyze_body(
    state: &AppState,
    headers: &HeaderMap,
    body: Body,
) -> RequestResult<AnalysisReport> {
    let bytes = read_body(state, headers, body).await?;
    let text = request::decode_text(&bytes, state.input_limit)?;
    Ok(analyze_text(text))
}

/// Read the whole body, refusing early when the declared size is over the limit.
async fn read_body(state: &AppState, headers: &HeaderMap, body: Body) -> RequestResult<Bytes> {
    if let Some(declared) = content_length(headers) {
        request::check_size(declared, state.input_limit)?;
    }

    let max = state.input_limit.unwrap_or(usize::MAX);
    axum::body::to_bytes(body, max).await.map_err(|e| {
        debug!(error = %e, "failed to read request body");
        match state.input_limit {
            Some(limit) if hit_length_limit(&e) => RequestError::LimitExceeded { limit },
            _ => RequestError::Unreadable,
        }
    })
}

/// Whether a body read stopped because it crossed the size limit.
fn hit_length_limit(err: &axum::Error) -> bool {
    std::iter::successors(Some(err as &(dyn StdError + 'static)), |e: &&(dyn StdError + 'static)| (*e).source())
        .any(|e| e.is::<LengthLimitError>())
}

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn single_field(metric: Metric, value: String) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert(metric.field().to_string(), Value::String(value));
    payload
}

fn reject<T: Serialize>(endpoint: &str, err: &RequestError, payload: T) -> Response {
    warn!(endpoint, error = %err, "request rejected");
    Json(Envelope::error(payload, err)).into_response()
}

fn homepage(input_limit: Option<usize>) -> String {
    let limit_note = input_limit.map_or_else(
        || "<p>Request bodies are not size-limited.</p>".to_string(),
        |limit| {
            format!(
                "<p>Bodies over {limit} bytes are rejected:</p>\n\
                 <pre><code>{{\"grade\": \"0\", \"message\": \"Too many bytes: 12034. \
                 Current limit is {limit}.\", \"status\": \"ERROR\"}}</code></pre>"
            )
        },
    );

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Readability API</title>
    <style>
    table, th, td {{ border: 1px solid black; border-collapse: collapse; }}
    th, td {{ padding: 3px; }}
    td {{ font-family: monospace; }}
    </style>
</head>
<body>
    <p>Send plain text (<code>text/plain; charset=UTF-8</code>) as the POST body.</p>
    <table>
        <thead>
        <tr><th>Endpoint</th><th>Method</th><th>Returns</th></tr>
        </thead>
        <tbody>
        <tr><td>/</td><td>GET</td><td>This page.</td></tr>
        <tr><td>/health</td><td>GET</td><td><code>{{"status": "OK"}}</code></td></tr>
        <tr><td>/word-count</td><td>POST</td><td><code>{{"count": "77", "message": "OK", "status": "OK"}}</code></td></tr>
        <tr><td>/fkgl</td><td>POST</td><td>Flesch-Kincaid Grade Level: <code>{{"grade": "10.77", "message": "OK", "status": "OK"}}</code></td></tr>
        <tr><td>/fres</td><td>POST</td><td>Flesch Reading Ease Score: <code>{{"score": "52.16", "message": "OK", "status": "OK"}}</code></td></tr>
        <tr><td>/analyze</td><td>POST</td><td>All scores with sentence, word and syllable totals and averages.</td></tr>
        </tbody>
    </table>
    {limit_note}
</body>
</html>
"#
    )
}
