//! Endpoint handlers
//!
//! Apart from the registry, every handler returns a fixed or templated body.

use tracing::{debug, info, warn};

use crate::error::HandlerError;
use crate::http::request::Request;
use crate::http::response::{CONTENT_TYPE_TEXT, Response, ResponseBuilder, StatusCode};
use crate::jenkins::form;
use crate::jenkins::registry::{BuildId, Parameters};
use crate::jenkins::state::AppState;
use crate::jenkins::templates::FixtureJob;

/// Value of the `X-Text-Size` header on every log response.
pub const LOG_TEXT_SIZE: &str = "20";

const CRUMB_BODY: &str = r#"{"crumb":"some_crumb","crumbRequestField":"some_crumb_request_field"}"#;

const BUILD_INFO_BODY: &str = r#"{"building": false, "result": "SUCCESS"}"#;

/// `/crumbIssuer/api/json`
pub fn crumb() -> Response {
    Response::json(CRUMB_BODY)
}

/// `/job/{name}/api/json`
pub fn job_info(state: &AppState, name: &str) -> Response {
    match FixtureJob::from_name(name) {
        Some(job) => {
            let body = job.descriptor(&state.serving_addr);
            debug!(job = name, %body, "Job descriptor");
            Response::json(body)
        }
        None => {
            warn!(job = name, "Unknown job");
            ResponseBuilder::new(StatusCode::NotFound).build()
        }
    }
}

/// `/job/{name}/build`
pub async fn trigger_build(state: &AppState, req: &Request, name: &str) -> Response {
    info!(job = name, "Scheduling job");

    let id = state.registry.insert(name, Parameters::new()).await;
    queued(state, req, id)
}

/// `/job/{name}/buildWithParameters`
///
/// Undecodable form data is rejected before anything is recorded.
pub async fn trigger_build_with_parameters(
    state: &AppState,
    req: &Request,
    name: &str,
) -> Result<Response, HandlerError> {
    info!(job = name, "Scheduling job with parameters");

    let parameters = form::parse_form(req)?;
    info!(job = name, params = parameters.len(), "Parameters received");

    let id = state.registry.insert(name, parameters).await;
    Ok(queued(state, req, id))
}

/// `/queue/{id}/api/json`
///
/// Echoes the id as written in the path; the registry is not consulted.
pub fn queue_info(id: &str) -> Response {
    let body = format!(r#"{{"executable":{{"number":{}}}}}"#, id);
    debug!(%body, "Queue item");
    Response::json(body)
}

/// `/job/{name}/{id}/api/json`
///
/// Every build reports as finished and successful.
pub fn build_info(_name: &str, _id: &str) -> Response {
    Response::json(BUILD_INFO_BODY)
}

/// `/job/{name}/{id}/logText/progressiveText`
///
/// An id that does not parse is treated as 0, which is never allocated.
pub async fn build_log(state: &AppState, id: &str) -> Response {
    let id: i64 = id.parse().unwrap_or(0);

    let record = match BuildId::try_from(id) {
        Ok(build_id) => state.registry.get(build_id).await,
        Err(_) => None,
    };

    let body = match record {
        Some(record) => record.log(),
        None => format!("Build {} not found", id),
    };
    debug!(%body, "Build log");

    ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", CONTENT_TYPE_TEXT)
        .header("X-Text-Size", LOG_TEXT_SIZE)
        .body(body)
        .build()
}

/// Empty 200 pointing the client at the queue item for `id`.
fn queued(state: &AppState, req: &Request, id: BuildId) -> Response {
    let host = req.host().unwrap_or(&state.serving_addr);
    let location = format!("{}://{}/queue/{}", state.scheme, host, id);

    info!(%location, "Build queued");
    ResponseBuilder::new(StatusCode::Ok)
        .header("Location", location)
        .build()
}
