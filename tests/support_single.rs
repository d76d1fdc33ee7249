use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Child, Command, Output, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a keep-alive HTTP/1.1 server that answers every request with `status`.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server(status: u16) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, status));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}/databases/Bench", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Spawn a listener that accepts connections and never answers them.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_silent_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind silent server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let mut held = Vec::new();
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => held.push(stream),
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}/databases/Bench", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Returns a base URL nothing listens on.
///
/// # Errors
///
/// Returns an error if no ephemeral port can be reserved.
pub fn unreachable_url() -> Result<String, String> {
    let listener =
        TcpListener::bind("127.0.0.1:0").map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("local_addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/databases/Bench", addr))
}

fn handle_client(mut stream: TcpStream, status: u16) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Length: 2\r\nConnection: keep-alive\r\n\r\nOK",
        status
    );
    let mut pending = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let Some(request_len) = read_request(&mut stream, &mut pending, &mut chunk) else {
            break;
        };
        pending.drain(..request_len);
        if stream.write_all(response.as_bytes()).is_err() || stream.flush().is_err() {
            break;
        }
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request(stream: &mut TcpStream, pending: &mut Vec<u8>, chunk: &mut [u8]) -> Option<usize> {
    loop {
        if let Some(len) = complete_request_len(pending) {
            return Some(len);
        }
        match stream.read(chunk) {
            Ok(0) | Err(_) => return None,
            Ok(read) => pending.extend_from_slice(chunk.get(..read)?),
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

/// Run the `hitbench` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_hitbench<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = hitbench_bin()?;
    let workdir = std::env::temp_dir();
    Command::new(bin)
        .args(args)
        .current_dir(workdir)
        .env("HITBENCH_LOG", "error")
        .env("NO_COLOR", "1")
        .output()
        .map_err(|err| format!("run hitbench failed: {}", err))
}

/// Start the `hitbench` binary with captured stdout and stderr.
///
/// # Errors
///
/// Returns an error if the binary cannot be started.
pub fn spawn_hitbench<I, S>(args: I) -> Result<Child, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = hitbench_bin()?;
    let workdir = std::env::temp_dir();
    Command::new(bin)
        .args(args)
        .current_dir(workdir)
        .env("HITBENCH_LOG", "error")
        .env("NO_COLOR", "1")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| format!("spawn hitbench failed: {}", err))
}

fn hitbench_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_hitbench").map_or_else(
        || Err("CARGO_BIN_EXE_hitbench missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
