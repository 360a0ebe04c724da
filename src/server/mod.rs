//! Network front end: the accept loop and optional TLS.

pub mod listener;
pub mod tls;
