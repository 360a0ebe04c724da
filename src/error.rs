//! Error types for request handling.

use thiserror::Error;

use crate::http::response::Response;

/// Failures while decoding `application/x-www-form-urlencoded` input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// A `%` not followed by two hex digits.
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),

    /// A `;` inside a key=value pair.
    #[error("invalid semicolon separator in query")]
    SemicolonSeparator,
}

/// Errors a handler hands back to the router instead of a response.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Request form data could not be decoded.
    #[error("malformed form data: {0}")]
    Form(#[from] FormError),
}

impl HandlerError {
    /// Converts the error into the response sent to the client.
    pub fn into_response(self) -> Response {
        match self {
            HandlerError::Form(e) => Response::bad_request(&e.to_string()),
        }
    }
}
