//! Common test utilities and fixtures
//!
//! Every command runs against a throwaway HOME and working directory so no
//! real configuration or response log is touched.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use assert_cmd::Command;
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

const ENV_VARS: &[&str] = &[
    "PERSONA_QUIZ_CONFIG",
    "PERSONA_QUIZ_VARIANT",
    "PERSONA_QUIZ_WEBHOOK_ENABLED",
    "PERSONA_QUIZ_WEBHOOK_URL",
    "PERSONA_QUIZ_WEBHOOK_TIMEOUT_MS",
    "PERSONA_QUIZ_RESPONSES_FILE",
    "PERSONA_QUIZ_LOG_LEVEL",
    "PERSONA_QUIZ_LOG_FILE",
    "PERSONA_QUIZ_LOG_JSON",
    "RUST_LOG",
];

/// Isolated home directory for one test
pub struct Sandbox {
    pub home: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    pub fn cmd(&self) -> Command {
        quiz_cmd(self.home.path())
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.home.path().join(name)
    }

    pub fn responses_file(&self) -> PathBuf {
        self.path("responses.csv")
    }

    /// The log location when nothing overrides it
    pub fn default_responses_file(&self) -> PathBuf {
        self.home.path().join(".persona-quiz").join("responses.csv")
    }
}

/// `persona-quiz` with HOME, config dir and cwd pointed at `home`
pub fn quiz_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("persona-quiz").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Minimal HTTP endpoint that answers every request with a fixed status line
/// and keeps the request bodies.
pub struct MockWebhook {
    addr: SocketAddr,
    shutdown_tx: Option<mpsc::Sender<()>>,
    bodies: Arc<Mutex<Vec<String>>>,
}

impl MockWebhook {
    pub async fn start(status_line: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let bodies_clone = Arc::clone(&bodies);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            let bodies = Arc::clone(&bodies_clone);
                            tokio::spawn(handle_request(stream, status_line, bodies));
                        }
                    }
                    _ = shutdown_rx.recv() => break,
                }
            }
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            bodies,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/macros/s/test/exec", self.addr)
    }

    /// JSON bodies received so far
    pub fn bodies(&self) -> Vec<serde_json::Value> {
        self.bodies
            .lock()
            .iter()
            .map(|b| serde_json::from_str(b).unwrap())
            .collect()
    }
}

impl Drop for MockWebhook {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.try_send(());
        }
    }
}

/// Read one request, record its body, then reply
async fn handle_request(
    mut stream: TcpStream,
    status_line: &'static str,
    bodies: Arc<Mutex<Vec<String>>>,
) -> Option<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let (head_end, body_len) = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            break (end + 4, body_len);
        }
    };

    while buf.len() < head_end + body_len {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = (head_end + body_len).min(buf.len());
    bodies
        .lock()
        .push(String::from_utf8_lossy(&buf[head_end..end]).into_owned());

    let response = format!(
        "HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        status_line
    );
    stream.write_all(response.as_bytes()).await.ok()?;
    let _ = stream.shutdown().await;
    Some(())
}

/// A local address with nothing listening on it
pub fn unused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/exec", addr)
}
