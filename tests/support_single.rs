use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub const OK_RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK";
pub const ERROR_RESPONSE: &[u8] =
    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\nfail";

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

/// Spawn a lightweight HTTP server answering every request with `response`.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server(response: &'static [u8]) -> Result<(String, ServerHandle), String> {
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
                    thread::spawn(move || handle_client(stream, response));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// An address nothing listens on.
///
/// # Errors
///
/// Returns an error if a port cannot be reserved.
pub fn closed_port_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind probe failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("probe addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

fn handle_client(mut stream: TcpStream, response: &[u8]) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut buffer = [0u8; 4096];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    if stream.write_all(response).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `esperf` binary inside `workdir` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_esperf<I, S>(workdir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = esperf_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(workdir)
        .env("ESPERF_LOG", "error")
        .stdin(Stdio::null())
        .output()
        .map_err(|err| format!("run esperf failed: {}", err))
}

/// Reads the number printed after `label:` in the final report.
///
/// # Errors
///
/// Returns an error if the line is missing or the value is not a number.
pub fn report_value(stdout: &str, label: &str) -> Result<u64, String> {
    let prefix = format!("{}:", label);
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(&prefix))
        .ok_or_else(|| format!("missing '{}' in output:\n{}", label, stdout))?;
    let value = line
        .trim_start()
        .trim_start_matches(&prefix)
        .trim();
    value
        .parse::<u64>()
        .map_err(|err| format!("'{}' is not a count: {}", value, err))
}

fn esperf_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_esperf").map_or_else(
        || Err("CARGO_BIN_EXE_esperf missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
