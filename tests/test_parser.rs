use fake_jenkins::http::parser::{ParseError, parse_http_request};
use fake_jenkins::http::request::Method;

#[test]
fn test_parse_job_info_request() {
    let req = b"GET /job/job-no-parameters/api/json HTTP/1.1\r\nHost: ci.local:8080\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/job/job-no-parameters/api/json");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.host(), Some("ci.local:8080"));
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_form_post_with_body() {
    let req = b"POST /job/job-with-parameters/buildWithParameters HTTP/1.1\r\n\
Host: localhost\r\n\
Content-Type: application/x-www-form-urlencoded\r\n\
Content-Length: 18\r\n\r\nanything=something";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.body, b"anything=something".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_keeps_query_in_target() {
    let req = b"POST /job/demo/buildWithParameters?SOURCE_REVISION=abc HTTP/1.1\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/job/demo/buildWithParameters?SOURCE_REVISION=abc");
    assert_eq!(parsed.path_only(), "/job/demo/buildWithParameters");
    assert_eq!(parsed.query(), Some("SOURCE_REVISION=abc"));
}

#[test]
fn test_parse_pipelined_requests_consumes_one_at_a_time() {
    let first = b"GET /crumbIssuer/api/json HTTP/1.1\r\n\r\n".to_vec();
    let second = b"GET /queue/1/api/json HTTP/1.1\r\n\r\n".to_vec();
    let buf = [first.clone(), second].concat();

    let (parsed, consumed) = parse_http_request(&buf).unwrap();
    assert_eq!(parsed.path, "/crumbIssuer/api/json");
    assert_eq!(consumed, first.len());

    let (parsed, _) = parse_http_request(&buf[consumed..]).unwrap();
    assert_eq!(parsed.path, "/queue/1/api/json");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"POST /job/demo/buildWithParameters HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_invalid_http_method() {
    let req = b"INVALID / HTTP/1.1\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidMethod)));
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidHeader)));
}

#[test]
fn test_parse_malformed_request_line() {
    let req = b"GET /only-two-parts\r\n\r\n";
    assert!(matches!(parse_http_request(req), Err(ParseError::InvalidRequest)));

    let req = b"GET / FTP/1.0\r\n\r\n";
    assert!(matches!(parse_http_request(req), Err(ParseError::InvalidRequest)));
}

#[test]
fn test_parse_invalid_content_length() {
    let req = b"POST / HTTP/1.1\r\nContent-Length: lots\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::InvalidContentLength)));
}

#[test]
fn test_parse_chunked_body_is_unsupported() {
    let req = b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::UnsupportedTransferEncoding)));
}

#[test]
fn test_parse_various_http_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
        ("CONNECT", Method::CONNECT),
        ("TRACE", Method::TRACE),
    ];

    for (method_str, expected_method) in methods {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let (parsed, _) = parse_http_request(req.as_bytes()).unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[test]
fn test_parse_header_lookup_ignores_case() {
    let req = b"GET / HTTP/1.1\r\nhost: lower.example\r\nAUTHORIZATION: Basic abc\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    // Names are stored as sent, lookups ignore case
    assert!(parsed.headers.contains_key("host"));
    assert_eq!(parsed.header("Host"), Some("lower.example"));
    assert_eq!(parsed.header("Authorization"), Some("Basic abc"));
}
