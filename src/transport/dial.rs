use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpStream, lookup_host};
use tokio::time::timeout;
use tracing::debug;

use crate::error::TransportError;

use super::{CountingStream, ThroughputCounters};

/// Host/port pair a worker connects to, plus the `Host` header value for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub authority: String,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Resolves and connects to `endpoint`, bounding both steps by `connect_timeout`.
///
/// # Errors
///
/// Returns an error when resolution fails, nothing resolves, the connect
/// fails, or the timeout elapses.
pub async fn dial(
    endpoint: &Endpoint,
    connect_timeout: Duration,
    counters: &Arc<ThroughputCounters>,
) -> Result<CountingStream<TcpStream>, TransportError> {
    let connect = async {
        let mut addrs = lookup_host((endpoint.host.as_str(), endpoint.port))
            .await
            .map_err(|err| TransportError::Resolve {
                host: endpoint.host.clone(),
                port: endpoint.port,
                source: err,
            })?;
        let Some(addr) = addrs.next() else {
            return Err(TransportError::NoAddresses {
                host: endpoint.host.clone(),
            });
        };
        TcpStream::connect(addr)
            .await
            .map_err(|err| TransportError::Connect {
                addr: addr.to_string(),
                source: err,
            })
    };

    let stream = match timeout(connect_timeout, connect).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(TransportError::ConnectTimeout {
                addr: endpoint.to_string(),
                timeout: connect_timeout,
            });
        }
    };
    if let Err(err) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY on {}: {}", endpoint, err);
    }

    Ok(CountingStream::new(stream, Arc::clone(counters)))
}
