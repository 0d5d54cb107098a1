//! Unified error type.

use std::fmt;
use std::net::SocketAddr;

/// The error type returned by the crate's fallible operations.
///
/// Application-level outcomes (400, 404, 405) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type only
/// surfaces process-level failures during startup.
#[derive(Debug)]
pub enum Error {
    /// The listening socket could not be bound.
    Bind { addr: SocketAddr, source: std::io::Error },
    /// A global tracing subscriber was already installed.
    Logging(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { addr, source } => write!(f, "bind {addr}: {source}"),
            Self::Logging(msg) => write!(f, "logging: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source),
            Self::Logging(_) => None,
        }
    }
}
