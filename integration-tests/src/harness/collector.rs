use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use url::Url;

/// One POST received by the collector.
#[derive(Debug, Clone)]
pub struct Received {
    pub path: String,
    pub source: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// A tiny HTTP/1.1 server that records every request body and answers with a
/// fixed status.
pub struct Collector {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Received>>>,
}

impl Collector {
    pub fn start() -> Self {
        Self::start_with_status(200)
    }

    pub fn start_with_status(status: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind collector");
        let addr = listener.local_addr().expect("collector has no address");
        let received = Arc::new(Mutex::new(Vec::new()));

        thread::spawn({
            let received = received.clone();
            move || {
                for stream in listener.incoming() {
                    let Ok(stream) = stream else { continue };
                    let received = received.clone();
                    thread::spawn(move || serve(stream, status, &received));
                }
            }
        });

        Self { addr, received }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/ingest", self.addr)).unwrap()
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    /// All received bodies, concatenated in arrival order.
    pub fn body(&self) -> Vec<u8> {
        self.received()
            .into_iter()
            .flat_map(|r| r.body)
            .collect()
    }

    /// Waits until at least `len` body bytes have arrived.
    pub fn wait_for_bytes(&self, len: usize, timeout: Duration) -> Vec<u8> {
        let deadline = Instant::now() + timeout;
        loop {
            let body = self.body();
            if body.len() >= len || Instant::now() >= deadline {
                return body;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

/// An address nothing listens on.
pub fn closed_port_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/ingest")).unwrap()
}

fn serve(stream: TcpStream, status: u16, received: &Mutex<Vec<Received>>) {
    let Ok(read_half) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(read_half);
    let mut writer = stream;

    // Keep-alive: serve requests until the client hangs up.
    loop {
        let mut request_line = String::new();
        match reader.read_line(&mut request_line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        let path = request_line
            .split_whitespace()
            .nth(1)
            .unwrap_or_default()
            .to_string();

        let mut headers = HashMap::new();
        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            }
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
            }
        }

        let len = headers
            .get("content-length")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        let mut body = vec![0; len];
        if reader.read_exact(&mut body).is_err() {
            return;
        }

        received.lock().unwrap().push(Received {
            path,
            source: headers.remove("x-tailpost-source"),
            content_type: headers.remove("content-type"),
            body,
        });

        let response = format!("HTTP/1.1 {status} Collector\r\nContent-Length: 0\r\n\r\n");
        if writer.write_all(response.as_bytes()).is_err() {
            return;
        }
    }
}
