use super::*;
use crate::net::types::{Paginated, Post};
use serde_json::json;

#[test]
fn join_url_normalizes_slashes() {
    assert_eq!(join_url("http://h/api/", "/posts/"), "http://h/api/posts/");
    assert_eq!(join_url("http://h/api", "posts/1/"), "http://h/api/posts/1/");
}

#[test]
fn non_empty_pairs_drops_blank_values() {
    let query = [("search", "  ".to_owned()), ("type", "donation".to_owned()), ("page", "2".to_owned())];
    assert_eq!(non_empty_pairs(&query), vec![("type", "donation"), ("page", "2")]);
}

#[test]
fn unwrap_envelope_prefers_non_null_data() {
    assert_eq!(unwrap_envelope(json!({ "data": { "id": "p1" } })), json!({ "id": "p1" }));
    assert_eq!(unwrap_envelope(json!({ "id": "p1" })), json!({ "id": "p1" }));
    assert_eq!(unwrap_envelope(json!({ "data": null, "id": "x" })), json!({ "data": null, "id": "x" }));
    assert_eq!(unwrap_envelope(json!([1, 2])), json!([1, 2]));
}

#[test]
fn decode_list_skips_malformed_entries() {
    let posts: Vec<Post> = decode_list(json!([{ "id": "a", "title": "A" }, 7, { "id": "b" }]));
    assert_eq!(posts.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn decode_list_non_array_is_empty() {
    let posts: Vec<Post> = decode_list(json!({ "detail": "nope" }));
    assert!(posts.is_empty());
    let none: Vec<Post> = decode_list(Value::Null);
    assert!(none.is_empty());
}

#[test]
fn paginated_body_decodes_without_unwrapping() {
    let page: Paginated<Post> = serde_json::from_value(json!({
        "data": [{ "id": "p1" }],
        "total": 11,
        "page": 2,
        "limit": 10,
        "total_pages": 2
    }))
    .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.total, 11);
    assert_eq!(page.total_pages, 2);
}

#[test]
fn error_message_prefers_error_then_message() {
    assert_eq!(error_message(&json!({ "error": "Bad", "message": "Other" })).as_deref(), Some("Bad"));
    assert_eq!(error_message(&json!({ "message": "Other" })).as_deref(), Some("Other"));
    assert_eq!(error_message(&json!({ "detail": "x" })), None);
    assert_eq!(error_message(&json!("plain text")), None);
}

#[test]
fn parse_body_handles_empty_and_text() {
    assert_eq!(parse_body(b""), Value::Null);
    assert_eq!(parse_body(b"  \n"), Value::Null);
    assert_eq!(parse_body(br#"{"ok":true}"#), json!({ "ok": true }));
    assert_eq!(parse_body(b"Internal Server Error"), json!("Internal Server Error"));
}

#[test]
fn user_message_falls_back_without_server_text() {
    let with_text = ApiError::Status {
        status: StatusCode::BAD_REQUEST,
        message: Some("Amount too large".to_owned()),
        body: json!({ "error": "Amount too large" }),
    };
    assert_eq!(with_text.user_message("fallback"), "Amount too large");
    assert_eq!(with_text.status(), Some(StatusCode::BAD_REQUEST));

    let without = ApiError::Multipart("bad/mime type".to_owned());
    assert_eq!(without.user_message("Failed to create post. Please try again."), "Failed to create post. Please try again.");
    assert_eq!(without.status(), None);
}

#[test]
fn endpoint_uses_configured_base() {
    let config = ClientConfig { api_base_url: "http://example.test/api".to_owned(), ..ClientConfig::default() };
    let client = ApiClient::new(&config, Arc::new(crate::storage::MemoryStore::new())).unwrap();
    assert_eq!(client.endpoint("/posts/"), "http://example.test/api/posts/");
    assert_eq!(client.base_url(), "http://example.test/api");
}
