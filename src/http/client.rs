use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::{CONNECTION, HOST, USER_AGENT};
use http::{Method, Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::client::conn::http1::{self, SendRequest};
use hyper_util::rt::TokioIo;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::debug;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::TransportError;
use crate::transport::{Endpoint, ThroughputCounters, dial};

use super::RequestTarget;

/// Per-phase limits for one request attempt.
///
/// `connect` bounds DNS resolution plus the TCP connect. `write` bounds waiting
/// for the connection to accept the next request, `write + read` bounds
/// sending it and receiving the response head, and `read` bounds draining the
/// response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
    pub write: Duration,
}

impl Timeouts {
    const fn response(self) -> Duration {
        self.write.saturating_add(self.read)
    }
}

struct Connection {
    endpoint: Endpoint,
    sender: SendRequest<Full<Bytes>>,
    driver: JoinHandle<()>,
}

impl Connection {
    async fn open(
        endpoint: &Endpoint,
        counters: &Arc<ThroughputCounters>,
        connect_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let stream = dial(endpoint, connect_timeout, counters).await?;
        let (sender, connection) = http1::handshake(TokioIo::new(stream))
            .await
            .map_err(|err| TransportError::Handshake { source: err })?;
        let peer = endpoint.to_string();
        let driver = tokio::spawn(async move {
            if let Err(err) = connection.await {
                debug!("Connection to {} terminated: {}", peer, err);
            }
        });

        Ok(Self {
            endpoint: endpoint.clone(),
            sender,
            driver,
        })
    }

    async fn wait_ready(&mut self, limit: Duration) -> bool {
        matches!(timeout(limit, self.sender.ready()).await, Ok(Ok(())))
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// One persistent HTTP/1.1 connection owned by a single worker.
///
/// The connection is reused while the server keeps it open and is dropped
/// after any failed attempt; the next call dials a fresh one.
pub struct KeepAliveClient {
    counters: Arc<ThroughputCounters>,
    timeouts: Timeouts,
    connection: Option<Connection>,
}

impl KeepAliveClient {
    #[must_use]
    pub const fn new(counters: Arc<ThroughputCounters>, timeouts: Timeouts) -> Self {
        Self {
            counters,
            timeouts,
            connection: None,
        }
    }

    #[cfg(test)]
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Sends one request and drains the response body.
    ///
    /// # Errors
    ///
    /// Returns an error for any transport-level failure: resolution, connect,
    /// handshake, send, body read, or a timeout in any of those phases.
    pub async fn send(
        &mut self,
        method: &Method,
        target: &RequestTarget,
        body: Option<&Bytes>,
    ) -> Result<StatusCode, TransportError> {
        let timeouts = self.timeouts;
        let request = build_request(method, target, body)?;
        let result = match self.ready_sender(&target.endpoint).await {
            Ok(sender) => exchange(sender, request, timeouts).await,
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.connection = None;
        }
        result
    }

    async fn ready_sender(
        &mut self,
        endpoint: &Endpoint,
    ) -> Result<&mut SendRequest<Full<Bytes>>, TransportError> {
        let write_timeout = self.timeouts.write;
        let existing = match self.connection.take() {
            Some(mut connection) if connection.endpoint == *endpoint => {
                connection.wait_ready(write_timeout).await.then_some(connection)
            }
            Some(_) | None => None,
        };
        let connection = match existing {
            Some(connection) => connection,
            None => Connection::open(endpoint, &self.counters, self.timeouts.connect).await?,
        };
        Ok(&mut self.connection.insert(connection).sender)
    }
}

fn build_request(
    method: &Method,
    target: &RequestTarget,
    body: Option<&Bytes>,
) -> Result<Request<Full<Bytes>>, TransportError> {
    Request::builder()
        .method(method.clone())
        .uri(target.path_and_query.as_str())
        .header(HOST, target.endpoint.authority.as_str())
        .header(CONNECTION, "keep-alive")
        .header(USER_AGENT, DEFAULT_USER_AGENT)
        .body(Full::new(body.cloned().unwrap_or_default()))
        .map_err(|err| TransportError::BuildRequest { source: err })
}

async fn exchange(
    sender: &mut SendRequest<Full<Bytes>>,
    request: Request<Full<Bytes>>,
    timeouts: Timeouts,
) -> Result<StatusCode, TransportError> {
    let response = match timeout(timeouts.response(), sender.send_request(request)).await {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => return Err(TransportError::Request { source: err }),
        Err(_) => {
            return Err(TransportError::Timeout {
                phase: "response",
                timeout: timeouts.response(),
            });
        }
    };

    let status = response.status();
    match timeout(timeouts.read, response.into_body().collect()).await {
        Ok(Ok(_)) => Ok(status),
        Ok(Err(err)) => Err(TransportError::Body { source: err }),
        Err(_) => Err(TransportError::Timeout {
            phase: "body",
            timeout: timeouts.read,
        }),
    }
}
