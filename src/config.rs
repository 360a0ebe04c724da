//! Command-line flags and the resolved server configuration.

use clap::Parser;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::http::connection::Timeouts;
use crate::jenkins::auth::Credentials;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TLS_PORT: u16 = 8443;

/// Flags accepted by the `fake-jenkins` binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "A stand-in Jenkins server for exercising CI clients", long_about = None)]
pub struct Args {
    /// Location of a file containing the TLS certificate
    #[arg(long)]
    pub cert: Option<PathBuf>,

    /// Location of the file containing the key of the TLS certificate
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Port to run the server on (8443 will be used if TLS certs are specified)
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Bind to localhost (127.0.0.1) only
    #[arg(long)]
    pub local: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Scheme written into `Location` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => f.write_str("http"),
            Scheme::Https => f.write_str("https"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_localhost: bool,
    pub tls: Option<TlsPaths>,
    pub credentials: Credentials,
    pub timeouts: Timeouts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_localhost: false,
            tls: None,
            credentials: Credentials::default(),
            timeouts: Timeouts::default(),
        }
    }
}

impl Config {
    /// Resolves parsed flags into a configuration.
    ///
    /// TLS is only enabled when both a certificate and a key are given; in
    /// that case the default port moves to 8443.
    pub fn from_args(args: Args) -> Self {
        let tls = match (args.cert, args.key) {
            (Some(cert), Some(key)) => Some(TlsPaths { cert, key }),
            (None, None) => None,
            (cert, key) => {
                tracing::warn!(
                    cert = ?cert,
                    key = ?key,
                    "Both --cert and --key are required for TLS; serving plain HTTP"
                );
                None
            }
        };

        let port = if tls.is_some() && args.port == DEFAULT_PORT {
            DEFAULT_TLS_PORT
        } else {
            args.port
        };

        Self {
            port,
            bind_localhost: args.local,
            tls,
            ..Self::default()
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        let ip = if self.bind_localhost {
            Ipv4Addr::LOCALHOST
        } else {
            Ipv4Addr::UNSPECIFIED
        };
        SocketAddr::from((ip, self.port))
    }

    pub fn scheme(&self) -> Scheme {
        if self.tls.is_some() {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }
}
