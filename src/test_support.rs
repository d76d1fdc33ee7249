use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// How the stub server answers every request.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StubBehavior {
    pub(crate) status: u16,
    pub(crate) keep_alive: bool,
    pub(crate) delay: Option<Duration>,
}

impl StubBehavior {
    pub(crate) const fn status(status: u16) -> Self {
        Self {
            status,
            keep_alive: true,
            delay: None,
        }
    }
}

pub(crate) struct StubServer {
    pub(crate) url: String,
    accepted: Arc<AtomicUsize>,
    requests: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl StubServer {
    pub(crate) fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub(crate) fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

/// Binds an HTTP/1.1 stub on an ephemeral loopback port.
pub(crate) async fn spawn_stub_server(behavior: StubBehavior) -> Result<StubServer, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind stub server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("stub server addr failed: {}", err))?;
    let accepted = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(AtomicUsize::new(0));

    let task = {
        let accepted = Arc::clone(&accepted);
        let requests = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                accepted.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve_connection(socket, behavior, Arc::clone(&requests)));
            }
        })
    };

    Ok(StubServer {
        url: format!("http://{}", addr),
        accepted,
        requests,
        task,
    })
}

/// Returns a URL nothing listens on.
pub(crate) async fn unreachable_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("local_addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

async fn serve_connection(mut socket: TcpStream, behavior: StubBehavior, requests: Arc<AtomicUsize>) {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let request_len = loop {
            if let Some(len) = complete_request_len(&buffer) {
                break len;
            }
            match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(read) => buffer.extend_from_slice(chunk.get(..read).unwrap_or_default()),
            }
        };
        buffer.drain(..request_len);
        requests.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = behavior.delay {
            tokio::time::sleep(delay).await;
        }

        let reason = http::StatusCode::from_u16(behavior.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown");
        let connection = if behavior.keep_alive {
            "keep-alive"
        } else {
            "close"
        };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: 2\r\nConnection: {}\r\n\r\nOK",
            behavior.status, reason, connection
        );
        if socket.write_all(response.as_bytes()).await.is_err() {
            return;
        }
        if !behavior.keep_alive {
            drop(socket.shutdown().await);
            return;
        }
    }
}

fn complete_request_len(buffer: &[u8]) -> Option<usize> {
    let head_end = buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")?
        .checked_add(4)?;
    let head = std::str::from_utf8(buffer.get(..head_end)?).ok()?;
    let body_len = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    let total = head_end.checked_add(body_len)?;
    (buffer.len() >= total).then_some(total)
}
