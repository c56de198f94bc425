//! HTTP surface of the inspector.
//!
//! Translates inbound requests into [`EventDraft`]s, records them in the
//! shared [`EventLog`], and serves recorded events back as JSON.
//!
//! | Path            | Methods          | Result                              |
//! |-----------------|------------------|-------------------------------------|
//! | `/hook`         | POST, PUT, PATCH | `201` with the recorded event       |
//! | `/events`       | GET              | `200` with all events, oldest first |
//! | `/events/{id}`  | GET              | `200` with one event, or `400`/`404` |
//! | anything else   | any              | `200` with the usage text           |
//!
//! Disallowed methods on the first three paths get `405` with a plain-text
//! hint. HEAD counts as disallowed on the GET-only paths.

use crate::config::DEFAULT_MAX_BODY_BYTES;
use crate::error::GatewayError;
use crate::event::EventDraft;
use crate::log::EventLog;
use axum::body;
use axum::extract::rejection::PathRejection;
use axum::extract::{ConnectInfo, Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Plain-text help served on `/` and on every unrouted path.
pub const USAGE: &str = "
Webhook Inspector

Endpoints:

  POST /hook         -> send any request here (JSON, form, etc.)
  GET  /events       -> list the most recent events received
  GET  /events/{id}  -> show a single event

Example:

  curl -X POST http://localhost:8082/hook -H \"Content-Type: application/json\" -d '{\"foo\":\"bar\"}'
";

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub log: Arc<EventLog>,
    /// Bodies larger than this are rejected with `400` and not recorded.
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(log: Arc<EventLog>) -> Self {
        AppState {
            log,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// Build the inspector's router.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so
/// that recorded events carry the peer address.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/hook",
            post(record_hook)
                .put(record_hook)
                .patch(record_hook)
                .fallback(hook_method_not_allowed),
        )
        .route(
            "/events",
            get(list_events).head(get_only).fallback(get_only),
        )
        .route(
            "/events/",
            get(missing_event_id).head(get_only).fallback(get_only),
        )
        .route(
            "/events/{*rest}",
            get(get_event).head(get_only).fallback(get_only),
        )
        .fallback(usage)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn usage() -> &'static str {
    USAGE
}

async fn record_hook(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, GatewayError> {
    let (parts, body) = request.into_parts();

    let bytes = body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(|e| GatewayError::UnreadableBody(e.to_string()))?;

    let remote_ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();

    let mut draft = EventDraft::new(parts.method.as_str(), parts.uri.path())
        .with_body_bytes(&bytes)
        .with_remote_ip(remote_ip);
    capture_headers(&mut draft, &parts.headers);

    let event = state.log.insert(draft);
    log::info!(
        "recorded event {} ({} {}, {} byte body) from {}",
        event.id,
        event.method,
        event.path,
        bytes.len(),
        event.remote_ip
    );

    Ok(json_response(StatusCode::CREATED, &event))
}

async fn list_events(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, &state.log.list())
}

// `rest` arrives percent-decoded.
async fn get_event(
    State(state): State<AppState>,
    rest: Result<Path<String>, PathRejection>,
) -> Result<Response, GatewayError> {
    let Path(rest) = rest.map_err(|e| GatewayError::InvalidId(e.body_text()))?;
    let id = parse_event_id(&rest)?;
    let event = u64::try_from(id)
        .ok()
        .and_then(|id| state.log.get(id))
        .ok_or(GatewayError::NotFound(id))?;
    Ok(json_response(StatusCode::OK, &event))
}

async fn missing_event_id() -> GatewayError {
    GatewayError::MissingId
}

async fn hook_method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed("Use POST/PUT/PATCH to send events")
}

async fn get_only() -> GatewayError {
    GatewayError::MethodNotAllowed("Use GET")
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
        Json(value),
    )
        .into_response()
}

/// Extract the event identifier from the decoded path remainder after
/// `/events/`.
///
/// The identifier is the first `/`-separated segment; anything after it is
/// ignored. Signed values parse (and later miss), so only an empty or
/// non-numeric segment is a client error.
///
/// ```
/// use webhook_inspector::error::GatewayError;
/// use webhook_inspector::gateway::parse_event_id;
///
/// assert_eq!(parse_event_id("42").unwrap(), 42);
/// assert_eq!(parse_event_id("7/raw").unwrap(), 7);
/// assert!(matches!(parse_event_id(""), Err(GatewayError::MissingId)));
/// assert!(matches!(parse_event_id("/3"), Err(GatewayError::MissingId)));
/// assert!(matches!(parse_event_id("x1"), Err(GatewayError::InvalidId(_))));
/// ```
pub fn parse_event_id(rest: &str) -> Result<i64, GatewayError> {
    let segment = rest.split('/').next().unwrap_or_default();
    if segment.is_empty() {
        return Err(GatewayError::MissingId);
    }
    segment
        .parse()
        .map_err(|_| GatewayError::InvalidId(segment.to_string()))
}

/// Copy request headers into a draft.
///
/// Names are written in canonical MIME form and repeated headers are joined
/// in arrival order. `Host` and `Transfer-Encoding` are skipped. Values that
/// are not valid UTF-8 are decoded lossily.
pub fn capture_headers(draft: &mut EventDraft, headers: &HeaderMap) {
    for (name, value) in headers {
        if *name == header::HOST || *name == header::TRANSFER_ENCODING {
            continue;
        }
        draft.push_header(
            canonical_header_name(name.as_str()),
            String::from_utf8_lossy(value.as_bytes()),
        );
    }
}

/// Render a header name in canonical MIME form: the first letter and every
/// letter following a hyphen upper-cased, the rest lower-cased.
///
/// ```
/// use webhook_inspector::gateway::canonical_header_name;
///
/// assert_eq!(canonical_header_name("content-type"), "Content-Type");
/// assert_eq!(canonical_header_name("x-github-event"), "X-Github-Event");
/// assert_eq!(canonical_header_name("ACCEPT"), "Accept");
/// ```
pub fn canonical_header_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}
