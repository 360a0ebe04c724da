//! Shared state handed to every request.

use crate::config::{Config, Scheme};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::jenkins::auth::Credentials;
use crate::jenkins::registry::BuildRegistry;
use crate::jenkins::router;

/// Everything the handlers need, constructed once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Builds triggered so far
    pub registry: BuildRegistry,
    /// Scheme used in `Location` headers
    pub scheme: Scheme,
    /// Address substituted into job descriptor urls
    pub serving_addr: String,
    /// Basic-auth credentials every route requires
    pub credentials: Credentials,
}

impl AppState {
    pub fn new(scheme: Scheme, serving_addr: impl Into<String>) -> Self {
        Self {
            registry: BuildRegistry::new(),
            scheme,
            serving_addr: serving_addr.into(),
            credentials: Credentials::default(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            credentials: cfg.credentials.clone(),
            ..Self::new(cfg.scheme(), cfg.listen_addr().to_string())
        }
    }

    /// Routes `req` and produces its response.
    pub async fn handle(&self, req: &Request) -> Response {
        router::dispatch(self, req).await
    }
}
