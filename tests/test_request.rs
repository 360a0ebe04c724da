use fake_jenkins::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

fn request_with_headers(version: &str, headers: &[(&str, &str)]) -> Request {
    Request {
        method: Method::GET,
        path: "/".to_string(),
        version: version.to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body: vec![],
    }
}

#[test]
fn test_request_header_retrieval() {
    let req = request_with_headers(
        "HTTP/1.1",
        &[("Host", "example.com"), ("Content-Type", "application/json")],
    );

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_content_length_parsing() {
    let req = request_with_headers("HTTP/1.1", &[("Content-Length", "42")]);
    assert_eq!(req.content_length(), 42);
}

#[test]
fn test_request_content_length_missing() {
    let req = Request {
        method: Method::GET,
        path: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        headers: HashMap::new(),
        body: vec![],
    };

    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_request_content_length_invalid() {
    let req = request_with_headers("HTTP/1.1", &[("Content-Length", "not-a-number")]);
    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_request_keep_alive_http11_default() {
    // HTTP/1.1 defaults to keep-alive
    let req = request_with_headers("HTTP/1.1", &[]);
    assert!(req.keep_alive());
}

#[test]
fn test_request_keep_alive_close() {
    let req = request_with_headers("HTTP/1.1", &[("Connection", "close")]);
    assert!(!req.keep_alive());
}

#[test]
fn test_request_keep_alive_http10_opt_in() {
    let req = request_with_headers("HTTP/1.0", &[("Connection", "Keep-Alive")]);
    assert!(req.keep_alive());

    let req = request_with_headers("HTTP/1.0", &[]);
    assert!(!req.keep_alive());
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("POST"), Some(Method::POST));
    assert_eq!(Method::from_str("INVALID"), None);
    assert_eq!(Method::from_str("get"), None); // Case-sensitive
}

#[test]
fn test_request_method_display_round_trips() {
    for method in [Method::GET, Method::POST, Method::HEAD, Method::TRACE] {
        assert_eq!(Method::from_str(&method.to_string()), Some(method));
    }
}

#[test]
fn test_request_builder_defaults_version() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/job/demo/build")
        .build()
        .unwrap();

    assert_eq!(req.version, "HTTP/1.1");
    assert!(req.body.is_empty());
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}

#[test]
fn test_request_target_without_query() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/queue/3/api/json")
        .build()
        .unwrap();

    assert_eq!(req.path_only(), "/queue/3/api/json");
    assert_eq!(req.query(), None);
}
