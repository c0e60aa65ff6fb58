//! Shared test fixtures: canned checker responses, a scripted transport and a
//! one-shot HTTP server.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Duration;

use async_trait::async_trait;
use csl_validator::request::{DocumentPart, OutboundRequest};
use csl_validator::transport::{TransportError, ValidatorTransport};

pub const STYLE_SOURCE: &str = "<style xmlns=\"http://purl.org/net/xbiblio/csl\">\n  <info>\n    <id>http://www.zotero.org/styles/apa</id>\n    <foo/>\n  </info>\n  <citation>\n    <layout/>\n  </citation>\n</style>";

pub fn two_errors_body() -> String {
    serde_json::json!({
        "messages": [
            {
                "type": "error",
                "lastLine": 4,
                "firstColumn": 5,
                "lastColumn": 10,
                "message": "element \"foo\" not allowed here",
                "extract": "<foo/>"
            },
            {
                "type": "error",
                "firstLine": 6,
                "lastLine": 8,
                "firstColumn": 3,
                "lastColumn": 13,
                "message": "element \"citation\" incomplete",
                "extract": "<citation>"
            }
        ],
        "source": { "code": STYLE_SOURCE }
    })
    .to_string()
}

pub fn clean_body() -> String {
    serde_json::json!({
        "messages": [],
        "source": { "code": STYLE_SOURCE }
    })
    .to_string()
}

pub fn non_document_body() -> String {
    serde_json::json!({
        "messages": [
            { "type": "non-document-error", "subType": "io", "message": "HTTP resource not retrievable. The HTTP status from the remote server was: 404." },
            { "type": "error", "lastLine": 1, "firstColumn": 1, "lastColumn": 2, "message": "ignored" }
        ],
        "source": { "code": "" }
    })
    .to_string()
}

#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Status(u16),
}

/// Answers by document key (`doc` parameter, `content` text or file name)
/// after a per-document delay
#[derive(Default)]
pub struct ScriptedTransport {
    replies: HashMap<String, (Duration, Reply)>,
    calls: Mutex<Vec<OutboundRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, key: &str, delay: Duration, reply: Reply) -> Self {
        self.replies.insert(key.to_string(), (delay, reply));
        self
    }

    pub fn calls(&self) -> Vec<OutboundRequest> {
        self.calls.lock().unwrap().clone()
    }
}

fn document_key(request: &OutboundRequest) -> String {
    match request {
        OutboundRequest::Get { .. } => request.parameter("doc").unwrap_or_default().to_string(),
        OutboundRequest::Post {
            document: DocumentPart::Content(text),
            ..
        } => text.clone(),
        OutboundRequest::Post {
            document: DocumentPart::File { name, .. },
            ..
        } => name.clone(),
    }
}

#[async_trait]
impl ValidatorTransport for ScriptedTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(request.clone());

        let (delay, reply) = self
            .replies
            .get(&document_key(request))
            .cloned()
            .unwrap_or((Duration::ZERO, Reply::Status(404)));

        tokio::time::sleep(delay).await;

        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(status) => Err(TransportError::Status(status)),
        }
    }
}

/// What the stub server received
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Serve exactly one request with `status` and `body`, returning the base URL
pub fn serve_once(status: u16, reply: String) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().expect("local addr");

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept connection");
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("set read timeout");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("read request line");

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header");
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((key, value)) = line.split_once(':') {
                headers.push((key.trim().to_string(), value.trim().to_string()));
            }
        }

        let header = |name: &str| {
            headers
                .iter()
                .find(|(key, _): &&(String, String)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.clone())
        };

        let body = if let Some(length) = header("Content-Length") {
            let mut body = vec![0u8; length.parse().expect("numeric content length")];
            reader.read_exact(&mut body).expect("read body");
            body
        } else if header("Transfer-Encoding").is_some_and(|v| v.eq_ignore_ascii_case("chunked")) {
            read_chunked(&mut reader)
        } else {
            Vec::new()
        };

        let reason = if status == 200 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            reply.len(),
            reply
        );
        let mut stream = stream;
        stream
            .write_all(response.as_bytes())
            .expect("write response");
        stream.flush().expect("flush response");

        CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            headers,
            body,
        }
    });

    (format!("http://{}/validate/", addr), handle)
}

fn read_chunked<R: BufRead>(reader: &mut R) -> Vec<u8> {
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).expect("read chunk size");
        let size_hex = size_line.trim().split(';').next().unwrap_or("0");
        let size = usize::from_str_radix(size_hex, 16).expect("hex chunk size");

        let mut chunk = vec![0u8; size];
        reader.read_exact(&mut chunk).expect("read chunk");
        body.extend_from_slice(&chunk);

        let mut crlf = String::new();
        reader.read_line(&mut crlf).expect("read chunk terminator");

        if size == 0 {
            return body;
        }
    }
}
