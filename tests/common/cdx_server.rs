//! Minimal HTTP/1.1 server standing in for the CDX server in tests.
//!
//! Every request is answered by a handler that maps the request target
//! (path and query) to a status code and body. Requested targets are recorded
//! so tests can check what was sent.

use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

type Handler = dyn Fn(&str) -> (u16, String) + Send + Sync;

#[derive(Debug, Clone)]
pub struct CdxServer {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CdxServer {
    /// Targets of all requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serves `body` with `status` for every request.
pub fn start_static(status: u16, body: &str) -> CdxServer {
    let body = body.to_owned();
    start(move |_| (status, body.clone()))
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(handler: impl Fn(&str) -> (u16, String) + Send + Sync + 'static) -> CdxServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let handler: Arc<Handler> = Arc::new(handler);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let server_requests = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream, handler.as_ref(), &server_requests);
        }
    });
    CdxServer {
        endpoint: format!("http://127.0.0.1:{}/cdx/search/cdx", port),
        requests,
    }
}

/// Returns an endpoint nothing listens on.
pub fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/cdx/search/cdx", port)
}

fn handle(mut stream: TcpStream, handler: &Handler, requests: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&request);
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split(' ').nth(1))
        .unwrap_or_default()
        .to_owned();
    requests.lock().unwrap().push(target.clone());

    let (status, body) = handler(&target);
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
