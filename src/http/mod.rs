//! HTTP protocol implementation.
//!
//! A small HTTP/1.1 server with support for keep-alive connections.
//!
//! # Architecture
//!
//! - **`connection`**: The request-response state machine for one client
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and header helpers
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received (or rejected as malformed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and run the handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! The connection is generic over its stream, so plain TCP and TLS streams
//! go through the same code.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use fake_jenkins::config::Scheme;
//! use fake_jenkins::http::connection::{Connection, Timeouts};
//! use fake_jenkins::jenkins::AppState;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let app = Arc::new(AppState::new(Scheme::Http, "127.0.0.1:8080"));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let app = Arc::clone(&app);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, app, Timeouts::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
