//! The Jenkins API surface
//!
//! Just enough of Jenkins' REST API for a client to trigger a build, poll
//! its queue item and status, and fetch its log.

pub mod auth;
pub mod form;
pub mod handlers;
pub mod registry;
pub mod router;
pub mod state;
pub mod templates;

pub use registry::{BuildId, BuildRecord, BuildRegistry, Parameters};
pub use router::Route;
pub use state::AppState;
