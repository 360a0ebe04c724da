//! fake-jenkins - a stand-in Jenkins server
//!
//! Serves the handful of Jenkins REST endpoints a CI client needs to trigger
//! a build, poll it and read its log, backed by an in-memory registry.

pub mod config;
pub mod error;
pub mod http;
pub mod jenkins;
pub mod server;
