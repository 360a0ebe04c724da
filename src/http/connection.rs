use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::timeout;

use crate::http::parser::{MAX_REQUEST_BYTES, ParseError, parse_http_request};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::jenkins::AppState;

const READ_CHUNK: usize = 4096;

/// Per-connection transport timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Longest wait for the next chunk of a request
    pub read: Duration,
    /// Longest wait for a response to be written
    pub write: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(15),
            write: Duration::from_secs(15),
        }
    }
}

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    app: Arc<AppState>,
    timeouts: Timeouts,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

/// What a read attempt produced.
enum Incoming {
    Request(Request),
    /// The bytes could not be a valid request; answer with this status and close.
    Rejected(StatusCode),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, app: Arc<AppState>, timeouts: Timeouts) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
            app,
            timeouts,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Incoming::Request(req) => ConnectionState::Processing(req),
                        Incoming::Rejected(status) => {
                            let response = Response::status_only(status);
                            ConnectionState::Writing(ResponseWriter::new(&response), false)
                        }
                        Incoming::Closed => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let mut response = self.app.handle(&req).await;

                    let keep_alive = req.keep_alive();
                    if !keep_alive {
                        response
                            .headers
                            .insert("Connection".to_string(), "close".to_string());
                    }

                    let writer = if req.method == Method::HEAD {
                        ResponseWriter::headers_only(&response)
                    } else {
                        ResponseWriter::new(&response)
                    };
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(mut writer, keep_alive) => {
                    let written =
                        timeout(self.timeouts.write, writer.write_to_stream(&mut self.stream)).await;

                    match written {
                        Ok(result) => result?,
                        Err(_) => {
                            tracing::debug!("Write timed out, closing connection");
                            break;
                        }
                    }

                    if keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<Incoming> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Incoming::Request(request));
                }

                // Declared lengths are checked once headers parse, so only an
                // unterminated header block can outgrow the limit here
                Err(ParseError::Incomplete) => {
                    if self.buffer.len() > MAX_REQUEST_BYTES {
                        tracing::warn!(buffered = self.buffer.len(), "Request headers too large");
                        return Ok(Incoming::Rejected(StatusCode::RequestHeaderFieldsTooLarge));
                    }
                }

                Err(ParseError::HeadersTooLarge) => {
                    tracing::warn!("Request headers too large");
                    return Ok(Incoming::Rejected(StatusCode::RequestHeaderFieldsTooLarge));
                }

                Err(ParseError::PayloadTooLarge) => {
                    tracing::warn!("Rejecting request with oversized body");
                    return Ok(Incoming::Rejected(StatusCode::PayloadTooLarge));
                }

                Err(ParseError::UnsupportedTransferEncoding) => {
                    tracing::warn!("Rejecting request with unsupported Transfer-Encoding");
                    return Ok(Incoming::Rejected(StatusCode::NotImplemented));
                }

                Err(e) => {
                    tracing::warn!(error = %e, "Malformed request");
                    return Ok(Incoming::Rejected(StatusCode::BadRequest));
                }
            }

            self.buffer.reserve(READ_CHUNK);
            let read = timeout(self.timeouts.read, self.stream.read_buf(&mut self.buffer)).await;

            let n = match read {
                Ok(result) => result?,
                Err(_) => {
                    tracing::debug!("Read timed out, closing connection");
                    return Ok(Incoming::Closed);
                }
            };

            if n == 0 {
                // Client closed connection
                return Ok(Incoming::Closed);
            }
        }
    }
}
