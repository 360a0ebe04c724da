use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::info;

use crate::config::Config;
use crate::http::connection::{Connection, Timeouts};
use crate::jenkins::AppState;
use crate::server::tls;

/// Binds the configured address and serves until the accept loop fails.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let tls = match &cfg.tls {
        Some(paths) => Some(tls::load_acceptor(&paths.cert, &paths.key)?),
        None => None,
    };

    let addr = cfg.listen_addr();
    info!("Binding to {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(scheme = %cfg.scheme(), port = cfg.port, "Listening");

    let app = Arc::new(AppState::from_config(cfg));
    serve(listener, app, tls, cfg.timeouts).await
}

/// Accepts connections on an already bound listener.
///
/// Each connection runs on its own task; with `tls` set, the handshake runs
/// first and a failed handshake only drops that connection.
pub async fn serve(
    listener: TcpListener,
    app: Arc<AppState>,
    tls: Option<TlsAcceptor>,
    timeouts: Timeouts,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        tracing::debug!("Accepted connection from {}", peer);

        let app = Arc::clone(&app);
        let tls = tls.clone();

        tokio::spawn(async move {
            let result = match tls {
                Some(acceptor) => match acceptor.accept(socket).await {
                    Ok(stream) => Connection::new(stream, app, timeouts).run().await,
                    Err(e) => {
                        tracing::warn!("TLS handshake with {} failed: {}", peer, e);
                        return;
                    }
                },
                None => Connection::new(socket, app, timeouts).run().await,
            };

            if let Err(e) = result {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
