//! Strict `application/x-www-form-urlencoded` decoding
//!
//! `url::form_urlencoded` decodes leniently, passing bad escapes through
//! as-is. Build parameters must reject those, so each pair is validated
//! before it is handed to the decoder. Input is handled as bytes; anything
//! that is not UTF-8 after decoding is replaced, not rejected.

use url::form_urlencoded;

use crate::error::FormError;
use crate::http::request::Request;
use crate::jenkins::registry::Parameters;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Collects the form values of `req`.
///
/// Body values come first, then query string values. The body only counts
/// for POST, PUT and PATCH requests with an urlencoded content type.
pub fn parse_form(req: &Request) -> Result<Parameters, FormError> {
    let mut params = Parameters::new();

    if req.method.carries_form_body() && is_urlencoded(req.header("Content-Type")) {
        parse_into(&mut params, &req.body)?;
    }

    if let Some(query) = req.query() {
        parse_into(&mut params, query.as_bytes())?;
    }

    Ok(params)
}

/// Decodes a single urlencoded string.
pub fn parse_urlencoded(input: &str) -> Result<Parameters, FormError> {
    let mut params = Parameters::new();
    parse_into(&mut params, input.as_bytes())?;
    Ok(params)
}

fn parse_into(params: &mut Parameters, input: &[u8]) -> Result<(), FormError> {
    for pair in input.split(|b| *b == b'&').filter(|pair| !pair.is_empty()) {
        if pair.contains(&b';') {
            return Err(FormError::SemicolonSeparator);
        }
        validate_escapes(pair)?;

        // A single pair decodes to exactly one entry
        for (key, value) in form_urlencoded::parse(pair) {
            params.append(key, value);
        }
    }

    Ok(())
}

fn validate_escapes(bytes: &[u8]) -> Result<(), FormError> {
    for (i, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let escape = bytes.get(i + 1..i + 3);
        let valid = escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));

        if !valid {
            let end = (i + 3).min(bytes.len());
            let shown = String::from_utf8_lossy(&bytes[i..end]).into_owned();
            return Err(FormError::InvalidEscape(shown));
        }
    }

    Ok(())
}

fn is_urlencoded(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.split(';').next().unwrap_or_default().trim())
        .is_some_and(|media| media.eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}
