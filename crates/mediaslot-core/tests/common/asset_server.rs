//! Minimal HTTP/1.1 server for integration tests.
//!
//! Knows a fixed set of paths. HEAD and GET on a known path answer 200 (GET
//! with a short body), anything else 404. Every request line is recorded so
//! tests can assert probe order.

use std::collections::HashSet;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct AssetServer {
    /// Base URL with trailing slash, e.g. "http://127.0.0.1:12345/".
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl AssetServer {
    /// `METHOD /path` for every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `paths` (without leading
/// slash). The server runs until the process exits.
pub fn start(paths: &[&str]) -> AssetServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let known: Arc<HashSet<String>> =
        Arc::new(paths.iter().map(|p| format!("/{p}")).collect());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let known = Arc::clone(&known);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &known, &log));
        }
    });
    AssetServer {
        base_url: format!("http://127.0.0.1:{port}/"),
        requests,
    }
}

fn handle(mut stream: TcpStream, known: &HashSet<String>, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");
    log.lock().unwrap().push(format!("{method} {path}"));

    let found = known.contains(path);
    let response = match (method, found) {
        ("HEAD", true) => {
            "HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\n".to_string()
        }
        ("GET", true) => {
            "HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\ndata".to_string()
        }
        ("HEAD" | "GET", false) => {
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
        }
        _ => "HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            .to_string(),
    };
    let _ = stream.write_all(response.as_bytes());
}
