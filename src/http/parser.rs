use crate::http::request::{Method, Request};
use std::collections::HashMap;

/// Largest request (headers plus body) the server accepts.
pub const MAX_REQUEST_BYTES: usize = 1024 * 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidRequest,
    InvalidMethod,
    InvalidHeader,
    InvalidContentLength,
    HeadersTooLarge,
    PayloadTooLarge,
    UnsupportedTransferEncoding,
    Incomplete,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ParseError::InvalidRequest => "malformed request line",
            ParseError::InvalidMethod => "unsupported method",
            ParseError::InvalidHeader => "malformed header",
            ParseError::InvalidContentLength => "invalid Content-Length",
            ParseError::HeadersTooLarge => "header block exceeds the request size limit",
            ParseError::PayloadTooLarge => "declared body exceeds the request size limit",
            ParseError::UnsupportedTransferEncoding => "unsupported Transfer-Encoding",
            ParseError::Incomplete => "incomplete request",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ParseError {}

/// Parses one request from the front of `buf`.
///
/// Returns the request and the number of bytes it occupied, or
/// `ParseError::Incomplete` when more bytes are needed.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    // Look for header/body separator
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    if headers_end + 4 > MAX_REQUEST_BYTES {
        return Err(ParseError::HeadersTooLarge);
    }

    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str =
        std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let mut parts = request_line.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let path = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;

    if parts.next().is_some() || !version.starts_with("HTTP/") {
        return Err(ParseError::InvalidRequest);
    }

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;

        if key.is_empty() || key.ends_with(char::is_whitespace) {
            return Err(ParseError::InvalidHeader);
        }

        let value = value.trim();
        if let Some(previous) = find_header(&headers, key) {
            // Framing headers may not disagree; Host may not repeat at all
            let conflicting = key.eq_ignore_ascii_case("Host")
                || (key.eq_ignore_ascii_case("Content-Length") && previous != value);
            if conflicting {
                return Err(ParseError::InvalidHeader);
            }
        }

        headers.insert(key.to_string(), value.to_string());
    }

    let header = |name: &str| find_header(&headers, name);

    if header("Transfer-Encoding").is_some_and(|te| !te.eq_ignore_ascii_case("identity")) {
        return Err(ParseError::UnsupportedTransferEncoding);
    }

    // Body
    let content_length = header("Content-Length")
        .map(|v| {
            v.parse::<usize>()
                .map_err(|_| ParseError::InvalidContentLength)
        })
        .transpose()?
        .unwrap_or(0);

    if content_length > MAX_REQUEST_BYTES - (headers_end + 4) {
        return Err(ParseError::PayloadTooLarge);
    }

    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let body = body_bytes[..content_length].to_vec();

    let request = Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    };

    let total_consumed = headers_end + 4 + content_length;
    Ok((request, total_consumed))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET /crumbIssuer/api/json HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/crumbIssuer/api/json");
        assert_eq!(parsed.header("host"), Some("example.com"));
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn lowercase_content_length_is_honoured() {
        let req = b"POST /x HTTP/1.1\r\ncontent-length: 3\r\n\r\nab";
        assert_eq!(parse_http_request(req).unwrap_err(), ParseError::Incomplete);
    }

    #[test]
    fn conflicting_content_lengths_are_rejected() {
        let req = b"POST /x HTTP/1.1\r\nContent-Length: 5\r\ncontent-length: 100\r\n\r\nhello";
        assert_eq!(parse_http_request(req).unwrap_err(), ParseError::InvalidHeader);
    }

    #[test]
    fn repeated_identical_content_length_is_accepted() {
        let req = b"POST /x HTTP/1.1\r\nContent-Length: 5\r\ncontent-length: 5\r\n\r\nhello";
        let (parsed, _) = parse_http_request(req).unwrap();
        assert_eq!(parsed.body, b"hello");
    }

    #[test]
    fn repeated_host_is_rejected() {
        let req = b"GET / HTTP/1.1\r\nHost: a.test\r\nhost: a.test\r\n\r\n";
        assert_eq!(parse_http_request(req).unwrap_err(), ParseError::InvalidHeader);
    }

    #[test]
    fn oversized_declared_body_is_rejected_before_it_arrives() {
        let req = format!(
            "POST /x HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            MAX_REQUEST_BYTES
        );
        assert_eq!(
            parse_http_request(req.as_bytes()).unwrap_err(),
            ParseError::PayloadTooLarge
        );
    }
}
