use std::fmt;
use std::io::ErrorKind;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::str::FromStr;

use tracing::{error, warn};

use crate::cancel::CancelToken;
use crate::error::{ClientError, Result};
use crate::throttle::LogThrottle;

/// A remote endpoint as `host:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Create an endpoint from host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl FromStr for Endpoint {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| ClientError::InvalidEndpoint(s.to_string()))?;
        if host.is_empty() {
            return Err(ClientError::InvalidEndpoint(s.to_string()));
        }
        let port: u16 = port
            .parse()
            .map_err(|_| ClientError::InvalidEndpoint(s.to_string()))?;
        Ok(Self::new(host, port))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Dial the endpoint, retrying indefinitely until a connection succeeds or
/// the token cancels.
///
/// Refused and transient network errors are retried immediately, with
/// diagnostics rate-limited through `throttle`. Resolution failures are
/// caller errors and propagate at once.
pub(crate) fn dial(
    endpoint: &Endpoint,
    throttle: &mut LogThrottle,
    cancel: &CancelToken,
) -> Result<TcpStream> {
    let addrs: Vec<SocketAddr> = (endpoint.host.as_str(), endpoint.port)
        .to_socket_addrs()
        .map_err(|source| ClientError::Resolve {
            endpoint: endpoint.to_string(),
            source,
        })?
        .collect();

    if addrs.is_empty() {
        return Err(ClientError::Resolve {
            endpoint: endpoint.to_string(),
            source: std::io::Error::new(ErrorKind::NotFound, "no addresses resolved"),
        });
    }

    loop {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        for addr in &addrs {
            match TcpStream::connect(addr) {
                Ok(stream) => return Ok(stream),
                Err(err) if err.kind() == ErrorKind::ConnectionRefused => {
                    if throttle.ready() {
                        warn!(%addr, "connection refused, retrying");
                    }
                }
                Err(err) => {
                    if throttle.ready() {
                        error!(%addr, error = %err, "connect failed, retrying");
                    }
                }
            }
        }
    }
}
