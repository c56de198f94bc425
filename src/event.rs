use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator used when a header name appears more than once.
pub const HEADER_VALUE_SEPARATOR: &str = ", ";

/// The caller-supplied part of an event, before the log stamps it.
///
/// A draft carries everything observed about an inbound request. It has no
/// identifier and no timestamp: [`EventLog::insert`](crate::EventLog::insert)
/// assigns both.
///
/// # Examples
///
/// ```
/// use webhook_inspector::EventDraft;
///
/// let draft = EventDraft::new("POST", "/hook")
///     .with_header("Accept", "text/html")
///     .with_header("Accept", "application/json")
///     .with_body(r#"{"foo":"bar"}"#)
///     .with_remote_ip("127.0.0.1:50312");
///
/// assert_eq!(draft.headers["Accept"], "text/html, application/json");
/// assert_eq!(draft.body, r#"{"foo":"bar"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    /// Request verb, e.g. `"POST"`.
    pub method: String,
    /// Request target path, without the query string.
    pub path: String,
    /// Header name to value. Repeated names are joined with `", "`.
    pub headers: BTreeMap<String, String>,
    /// Request body. Non-UTF-8 input is stored lossily, see
    /// [`EventDraft::with_body_bytes`].
    pub body: String,
    /// Peer address as seen by the transport.
    pub remote_ip: String,
}

impl EventDraft {
    /// Start a draft for the given method and path. Everything else is empty.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        EventDraft {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add one header value.
    ///
    /// If `name` is already present the value is appended to the existing one
    /// with `", "`, so repeated headers keep their arrival order.
    pub fn with_header(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.push_header(name, value);
        self
    }

    /// Replace the whole header map.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Set the body from a string.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the body from raw bytes.
    ///
    /// JSON strings must be valid Unicode, so invalid UTF-8 sequences are
    /// replaced with U+FFFD.
    ///
    /// ```
    /// use webhook_inspector::EventDraft;
    ///
    /// let draft = EventDraft::new("PUT", "/hook").with_body_bytes(b"ok\xff");
    /// assert_eq!(draft.body, "ok\u{FFFD}");
    /// ```
    pub fn with_body_bytes(mut self, body: &[u8]) -> Self {
        self.body = String::from_utf8_lossy(body).into_owned();
        self
    }

    /// Set the remote address.
    pub fn with_remote_ip(mut self, remote_ip: impl Into<String>) -> Self {
        self.remote_ip = remote_ip.into();
        self
    }

    /// In-place form of [`EventDraft::with_header`].
    pub fn push_header(&mut self, name: impl Into<String>, value: impl AsRef<str>) {
        let value = value.as_ref();
        self.headers
            .entry(name.into())
            .and_modify(|existing| {
                existing.push_str(HEADER_VALUE_SEPARATOR);
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
}

/// A recorded request.
///
/// Events are immutable once the log has stamped them: the log hands out
/// clones, never references into its storage. `id` and `created_at` are set
/// by [`EventLog::insert`](crate::EventLog::insert), never by the caller.
///
/// The JSON shape is a stable wire contract:
///
/// ```text
/// {
///   "id": 7,
///   "method": "POST",
///   "path": "/hook",
///   "headers": { "Content-Type": "application/json" },
///   "body": "{\"foo\":\"bar\"}",
///   "remote_ip": "127.0.0.1:50312",
///   "created_at": "2026-10-18T09:14:03.512734Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct Event {
    /// Unique, strictly increasing in insertion order. Starts at 1.
    pub id: u64,
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub remote_ip: String,
    /// Insertion time, RFC 3339 with sub-second precision on the wire.
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub(crate) fn stamp(draft: EventDraft, id: u64, created_at: DateTime<Utc>) -> Self {
        let EventDraft {
            method,
            path,
            headers,
            body,
            remote_ip,
        } = draft;
        Event {
            id,
            method,
            path,
            headers,
            body,
            remote_ip,
            created_at,
        }
    }

    /// Look up a header by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
