//! Request routing
//!
//! Matches the request path against the route table, logs the request,
//! enforces basic auth and calls the matching handler. Paths no route
//! matches get a plain 404 without an auth check.
//!
//! Matching happens on the percent-decoded path, so `/job/my%20job/build`
//! schedules `my job`.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use tracing::{info, warn};

use crate::error::HandlerError;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::jenkins::auth;
use crate::jenkins::handlers;
use crate::jenkins::state::AppState;

/// A matched route with its path variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/crumbIssuer/api/json`
    Crumb,
    /// `/job/{name}/api/json`
    JobInfo { name: &'a str },
    /// `/job/{name}/build`
    Build { name: &'a str },
    /// `/job/{name}/buildWithParameters`
    BuildWithParameters { name: &'a str },
    /// `/queue/{id}/api/json`
    QueueInfo { id: &'a str },
    /// `/job/{name}/{id}/api/json`
    BuildInfo { name: &'a str, id: &'a str },
    /// `/job/{name}/{id}/logText/progressiveText`
    BuildLog { name: &'a str, id: &'a str },
}

impl<'a> Route<'a> {
    /// Resolves a path (without query string) to a route.
    ///
    /// Path variables must be non-empty; a trailing slash never matches.
    pub fn resolve(path: &'a str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        let segments: Vec<&'a str> = rest.split('/').collect();

        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let route = match segments[..] {
            ["crumbIssuer", "api", "json"] => Route::Crumb,
            ["job", name, "api", "json"] => Route::JobInfo { name },
            ["job", name, "build"] => Route::Build { name },
            ["job", name, "buildWithParameters"] => Route::BuildWithParameters { name },
            ["queue", id, "api", "json"] => Route::QueueInfo { id },
            ["job", name, id, "api", "json"] => Route::BuildInfo { name, id },
            ["job", name, id, "logText", "progressiveText"] => Route::BuildLog { name, id },
            _ => return None,
        };

        Some(route)
    }
}

/// Percent-decodes a request path. Invalid UTF-8 is replaced, not rejected.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path).decode_utf8_lossy()
}

/// Handles one request end to end.
pub async fn dispatch(state: &AppState, req: &Request) -> Response {
    let path = decode_path(req.path_only());
    let Some(route) = Route::resolve(&path) else {
        info!(method = %req.method, uri = %req.path, "No route");
        return Response::not_found();
    };

    info!(method = %req.method, uri = %req.path, "Request");

    if !state.credentials.authorize(req.header("Authorization")) {
        warn!(uri = %req.path, "Basic authentication failed");
        return auth::unauthorized();
    }

    let result: Result<Response, HandlerError> = match route {
        Route::Crumb => Ok(handlers::crumb()),
        Route::JobInfo { name } => Ok(handlers::job_info(state, name)),
        Route::Build { name } => Ok(handlers::trigger_build(state, req, name).await),
        Route::BuildWithParameters { name } => {
            handlers::trigger_build_with_parameters(state, req, name).await
        }
        Route::QueueInfo { id } => Ok(handlers::queue_info(id)),
        Route::BuildInfo { name, id } => Ok(handlers::build_info(name, id)),
        Route::BuildLog { id, .. } => Ok(handlers::build_log(state, id).await),
    };

    result.unwrap_or_else(|e| {
        warn!(uri = %req.path, error = %e, "Request rejected");
        e.into_response()
    })
}
