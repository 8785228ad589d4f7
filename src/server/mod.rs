/*!
 * HTTP API surface.
 *
 * A deliberately small HTTP/1.1 server on a tokio `TcpListener` exposing the
 * flashcard deck over two routes:
 *
 * - `GET /flashcards/{id}` returns a stored card as JSON, or 404
 * - `POST /flashcards` creates a card through the full pipeline, 201 on success
 *
 * Every response body is JSON; failures use an `{"error": "..."}` envelope.
 * Each connection handles a single request and is then closed.
 */

use anyhow::{Context, Result};
use log::{debug, error, info};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::app_controller::Controller;
use crate::errors::AppError;

/// Requests larger than this are rejected outright
const MAX_REQUEST_BYTES: usize = 64 * 1024;

/// JSON body accepted by `POST /flashcards`
#[derive(Debug, Deserialize)]
struct CreateCardBody {
    /// Source word or phrase (required); "word" is accepted as an alias
    #[serde(alias = "word")]
    text: String,
    /// Optional category hint for image queries
    #[serde(default)]
    category: Option<String>,
    /// Optional keyword hints for image queries
    #[serde(default)]
    keywords: Vec<String>,
}

/// A minimal parsed HTTP request
#[derive(Debug)]
struct Request {
    method: String,
    path: String,
    body: Vec<u8>,
}

/// The flashcard HTTP server
pub struct Server {
    listener: TcpListener,
    controller: Arc<Controller>,
}

impl Server {
    /// Bind the server to an address. Use port 0 to pick an ephemeral port;
    /// `local_addr` reports the actual one.
    pub async fn bind(addr: &str, controller: Arc<Controller>) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind HTTP server to {}", addr))?;

        info!("HTTP server listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            controller,
        })
    }

    /// The address the server is actually bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read server address")
    }

    /// Accept and serve connections until the task is dropped
    pub async fn run(self) -> Result<()> {
        loop {
            let (stream, peer) = self
                .listener
                .accept()
                .await
                .context("Failed to accept connection")?;

            debug!("Connection from {}", peer);

            let controller = Arc::clone(&self.controller);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, controller).await {
                    error!("Connection error from {}: {}", peer, e);
                }
            });
        }
    }
}

/// Read one request from the stream, dispatch it, write one response
async fn handle_connection(mut stream: TcpStream, controller: Arc<Controller>) -> Result<()> {
    let request = match read_request(&mut stream).await {
        Ok(Some(request)) => request,
        Ok(None) => return Ok(()),
        Err(e) => {
            let response = error_response(400, &format!("Malformed request: {}", e));
            stream.write_all(response.as_bytes()).await?;
            return Ok(());
        }
    };

    let response = dispatch(&request, &controller).await;
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await.ok();
    Ok(())
}

/// Route a parsed request to its handler
async fn dispatch(request: &Request, controller: &Controller) -> String {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/flashcards") => create_card(request, controller).await,
        ("GET", path) if path.starts_with("/flashcards/") => {
            get_card(&path["/flashcards/".len()..], controller).await
        }
        _ => error_response(404, "Not found"),
    }
}

/// `GET /flashcards/{id}`
async fn get_card(id_segment: &str, controller: &Controller) -> String {
    let id: i64 = match id_segment.parse() {
        Ok(id) => id,
        Err(_) => return error_response(400, "Card id must be an integer"),
    };

    match controller.get_card(id).await {
        Ok(Some(card)) => json_response(200, &json!(card)),
        Ok(None) => error_response(404, &format!("No card with id {}", id)),
        Err(e) => {
            error!("Failed to load card {}: {}", id, e);
            error_response(500, "Internal error")
        }
    }
}

/// `POST /flashcards`
async fn create_card(request: &Request, controller: &Controller) -> String {
    let body: CreateCardBody = match serde_json::from_slice(&request.body) {
        Ok(body) => body,
        Err(e) => return error_response(400, &format!("Invalid JSON body: {}", e)),
    };

    let content = controller.request_for(&body.text, body.category, body.keywords);

    match controller.create_card(content).await {
        Ok(outcome) => json_response(
            201,
            &json!({
                "card": outcome.card,
                "diagnostics": outcome.diagnostics,
            }),
        ),
        Err(AppError::Validation(msg)) => error_response(400, &msg),
        Err(AppError::Duplicate(msg)) => error_response(409, &msg),
        Err(AppError::RateLimited(msg)) => error_response(429, &msg),
        Err(e) => {
            error!("Card creation failed: {}", e);
            error_response(500, "Internal error")
        }
    }
}

/// Read and parse one HTTP/1.1 request. Returns `Ok(None)` when the client
/// closed the connection without sending anything.
async fn read_request(stream: &mut TcpStream) -> Result<Option<Request>> {
    let mut buffer = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    // Read until the end of the header block
    let header_end = loop {
        let n = stream.read(&mut chunk).await.context("Read failed")?;
        if n == 0 {
            if buffer.is_empty() {
                return Ok(None);
            }
            anyhow::bail!("Connection closed mid-request");
        }
        buffer.extend_from_slice(&chunk[..n]);

        if buffer.len() > MAX_REQUEST_BYTES {
            anyhow::bail!("Request too large");
        }

        if let Some(pos) = find_header_end(&buffer) {
            break pos;
        }
    };

    let header_text = std::str::from_utf8(&buffer[..header_end]).context("Headers not UTF-8")?;
    let mut lines = header_text.split("\r\n");

    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts
        .next()
        .context("Missing method in request line")?
        .to_string();
    let path = parts
        .next()
        .context("Missing path in request line")?
        .to_string();

    let content_length = lines
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .next()
        .unwrap_or(0);

    if content_length > MAX_REQUEST_BYTES {
        anyhow::bail!("Request body too large");
    }

    let body_start = header_end + 4;
    let mut body = buffer[body_start.min(buffer.len())..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await.context("Read failed")?;
        if n == 0 {
            anyhow::bail!("Connection closed mid-body");
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Ok(Some(Request { method, path, body }))
}

/// Position of the `\r\n\r\n` header terminator, if present
fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Serialize a JSON success response
fn json_response(status: u16, body: &serde_json::Value) -> String {
    let body = body.to_string();
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text(status),
        body.len(),
        body
    )
}

/// Serialize a JSON error response with the standard envelope
fn error_response(status: u16, message: &str) -> String {
    json_response(status, &json!({ "error": message }))
}

/// Reason phrase for the status codes this server emits
fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        409 => "Conflict",
        429 => "Too Many Requests",
        _ => "Internal Server Error",
    }
}
