mod common;

use chrono::DateTime;
use common::dummy_draft;
use serde_json::Value;
use std::collections::BTreeMap;
use webhook_inspector::{Event, EventDraft, EventLog};

#[test]
fn test_draft_new_is_empty_apart_from_method_and_path() {
    let draft = EventDraft::new("PATCH", "/hook");
    assert_eq!(draft.method, "PATCH");
    assert_eq!(draft.path, "/hook");
    assert!(draft.headers.is_empty());
    assert_eq!(draft.body, "");
    assert_eq!(draft.remote_ip, "");
}

#[test]
fn test_repeated_header_is_joined_in_order() {
    let draft = EventDraft::new("POST", "/hook")
        .with_header("X-Trace", "first")
        .with_header("X-Trace", "second")
        .with_header("X-Trace", "third");
    assert_eq!(draft.headers["X-Trace"], "first, second, third");
}

#[test]
fn test_header_names_are_case_sensitive() {
    let draft = EventDraft::new("POST", "/hook")
        .with_header("Accept", "a")
        .with_header("accept", "b");
    assert_eq!(draft.headers.len(), 2);
    assert_eq!(draft.headers["Accept"], "a");
    assert_eq!(draft.headers["accept"], "b");
}

#[test]
fn test_with_headers_replaces_map() {
    let mut headers = BTreeMap::new();
    headers.insert("X-One".to_string(), "1".to_string());
    let draft = EventDraft::new("POST", "/hook")
        .with_header("X-Gone", "x")
        .with_headers(headers);
    assert_eq!(draft.headers.len(), 1);
    assert_eq!(draft.headers["X-One"], "1");
}

#[test]
fn test_body_bytes_lossy() {
    let draft = EventDraft::new("POST", "/hook").with_body_bytes(&[0x68, 0x69, 0xc3, 0x28]);
    assert_eq!(draft.body, "hi\u{FFFD}(");

    let draft = EventDraft::new("POST", "/hook").with_body_bytes("ação".as_bytes());
    assert_eq!(draft.body, "ação");
}

#[test]
fn test_event_json_field_names() {
    let log = EventLog::new(10);
    let event = log.insert(dummy_draft("POST"));
    let value: Value = serde_json::to_value(&event).unwrap();
    let obj = value.as_object().unwrap();

    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["body", "created_at", "headers", "id", "method", "path", "remote_ip"]
    );
    assert_eq!(obj["id"], 1);
    assert_eq!(obj["method"], "POST");
    assert_eq!(obj["path"], "/hook");
    assert_eq!(obj["headers"]["Content-Type"], "application/json");
    assert_eq!(obj["body"], r#"{"key":"value"}"#);
    assert_eq!(obj["remote_ip"], "127.0.0.1:40000");
}

#[test]
fn test_created_at_is_rfc3339() {
    let log = EventLog::new(10);
    let event = log.insert(dummy_draft("POST"));
    let value: Value = serde_json::to_value(&event).unwrap();
    let raw = value["created_at"].as_str().unwrap();

    let parsed = DateTime::parse_from_rfc3339(raw).unwrap();
    assert_eq!(parsed, event.created_at);
}

#[test]
fn test_event_deserializes_from_wire_shape() {
    let json = r#"{
        "id": 12,
        "method": "PUT",
        "path": "/hook",
        "headers": {"User-Agent": "curl/8.5.0"},
        "body": "",
        "remote_ip": "[::1]:53422",
        "created_at": "2026-10-18T09:14:03.512Z"
    }"#;
    let event: Event = serde_json::from_str(json).unwrap();
    assert_eq!(event.id, 12);
    assert_eq!(event.method, "PUT");
    assert_eq!(event.header("User-Agent"), Some("curl/8.5.0"));
    assert_eq!(event.header("user-agent"), None);
    assert_eq!(event.remote_ip, "[::1]:53422");
    assert_eq!(event.created_at.timestamp_subsec_millis(), 512);
}
