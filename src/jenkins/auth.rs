//! HTTP basic authentication
//!
//! Every routed request must carry `Authorization: Basic <base64(user:pass)>`
//! matching the configured credentials.

use base64::Engine;

use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Realm advertised in `WWW-Authenticate` challenges.
pub const REALM: &str = "Restricted";

const DEFAULT_USERNAME: &str = "jenkins";
const DEFAULT_TOKEN: &str = "token";

/// The username/token pair clients must present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_TOKEN.to_string(),
        }
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks an `Authorization` header value against these credentials.
    pub fn authorize(&self, header: Option<&str>) -> bool {
        let Some((username, password)) = header.and_then(decode_basic) else {
            return false;
        };

        // Both comparisons always run
        let user_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let pass_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
        user_ok & pass_ok
    }

    /// The header value a client would send for these credentials.
    pub fn header_value(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }
}

/// Splits a `Basic` authorization value into username and password.
fn decode_basic(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Basic") {
        return None;
    }

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// The challenge sent when credentials are missing or wrong.
pub fn unauthorized() -> Response {
    ResponseBuilder::new(StatusCode::Unauthorized)
        .header("WWW-Authenticate", format!("Basic realm=\"{}\"", REALM))
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(b"Unauthorized\n".to_vec())
        .build()
}
