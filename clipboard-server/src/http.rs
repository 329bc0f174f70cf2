//! Minimal HTTP/1.1 server-side codec
//!
//! The clipboard API carries everything in the request line's query string,
//! so this codec only parses the request line, the handful of headers the
//! connection loop cares about (`Content-Length`, `Connection`), and skips
//! any declared body. Responses are always JSON.

use std::collections::HashMap;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single head line (request line or header)
const MAX_LINE_BYTES: usize = 8 * 1024;

/// Upper bound on the number of header lines per request
const MAX_HEADER_LINES: usize = 100;

/// Upper bound on a request body; bodies are ignored, this just caps how
/// much we are willing to read and discard
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other(String),
}

impl Method {
    fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }
}

/// A parsed inbound request
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    /// Whether the client expects the connection to stay open afterwards
    pub keep_alive: bool,
}

impl Request {
    /// Returns a query parameter, treating an empty value as missing
    ///
    /// The original behavior makes no distinction between `?id=` and no
    /// `id` at all, so neither do we.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Reads one request from the stream
///
/// Returns `Ok(None)` on a clean end of stream before any request bytes,
/// and an error for anything this codec cannot parse (the caller drops the
/// connection in that case).
pub async fn read_request<R>(reader: &mut R) -> anyhow::Result<Option<Request>>
where
    R: AsyncBufRead + Unpin,
{
    let Some(request_line) = read_head_line(reader).await? else {
        return Ok(None);
    };

    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        anyhow::bail!("malformed request line {:?}", request_line);
    };
    if parts.next().is_some() || !version.starts_with("HTTP/") {
        anyhow::bail!("malformed request line {:?}", request_line);
    }

    let mut content_length = 0usize;
    let mut connection = None;
    let mut saw_head_end = false;
    for _ in 0..MAX_HEADER_LINES {
        let Some(line) = read_head_line(reader).await? else {
            anyhow::bail!("connection closed mid-headers");
        };
        if line.is_empty() {
            saw_head_end = true;
            break;
        }
        let Some((name, value)) = line.split_once(':') else {
            anyhow::bail!("malformed header line {:?}", line);
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value
                .parse()
                .map_err(|_| anyhow::format_err!("invalid content-length {:?}", value))?;
        } else if name.eq_ignore_ascii_case("connection") {
            connection = Some(value.to_ascii_lowercase());
        }
    }
    if !saw_head_end {
        anyhow::bail!("too many header lines");
    }

    // The body, if any, is irrelevant to the API; drain it so the next
    // request on this connection starts at the right offset.
    if content_length > 0 {
        if content_length > MAX_BODY_BYTES {
            anyhow::bail!("request body too large ({} bytes)", content_length);
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).await?;
    }

    let keep_alive = match connection.as_deref() {
        Some("close") => false,
        Some("keep-alive") => true,
        _ => version == "HTTP/1.1",
    };

    let (path, raw_query) = match target.split_once('?') {
        Some((path, raw_query)) => (path, raw_query),
        None => (target, ""),
    };

    Ok(Some(Request {
        method: Method::parse(method),
        path: path.to_string(),
        query: parse_query(raw_query),
        keep_alive,
    }))
}

/// Reads one CRLF-terminated head line, without the terminator
async fn read_head_line<R>(reader: &mut R) -> anyhow::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let bytes_read = reader.read_line(&mut line).await?;
    if bytes_read == 0 {
        return Ok(None);
    }
    if line.len() > MAX_LINE_BYTES {
        anyhow::bail!("head line too long ({} bytes)", line.len());
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Parses an `application/x-www-form-urlencoded` query string
///
/// Pairs that decode to invalid UTF-8 are skipped, matching the reference
/// parser which silently drops pairs it cannot decode. Malformed percent
/// sequences pass through literally.
fn parse_query(raw: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if let (Some(key), Some(value)) = (decode_component(key), decode_component(value)) {
            params.insert(key, value);
        }
    }
    params
}

fn decode_component(raw: &str) -> Option<String> {
    // '+' encodes a space in query strings
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw).ok().map(|decoded| decoded.into_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::InternalServerError => 500,
        }
    }

    fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

/// An outbound response with a JSON body
#[derive(Debug)]
pub struct Response {
    pub status: Status,
    pub allow: Option<&'static str>,
    pub body: Vec<u8>,
}

impl Response {
    /// Builds a response by JSON-encoding the payload
    ///
    /// An encoding failure on the way out is surfaced as a 500.
    pub fn json(status: Status, payload: &impl Serialize) -> Self {
        match serde_json::to_vec(payload) {
            Ok(body) => Self {
                status,
                allow: None,
                body,
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to encode response body");
                Self::internal_error()
            }
        }
    }

    /// A `{"message": ...}` response
    pub fn message(status: Status, message: &str) -> Self {
        Self::json(status, &serde_json::json!({ "message": message }))
    }

    pub fn internal_error() -> Self {
        Self {
            status: Status::InternalServerError,
            allow: None,
            body: br#"{"message":"internal server error"}"#.to_vec(),
        }
    }

    /// The 405 response required for anything other than GET/POST
    pub fn method_not_allowed() -> Self {
        let mut response = Self::message(Status::MethodNotAllowed, "method not allowed");
        response.allow = Some("GET, POST");
        response
    }

    /// Writes the response; `close` controls the `Connection` header
    pub async fn write_to<W>(&self, writer: &mut W, close: bool) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let mut head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n",
            self.status.code(),
            self.status.reason(),
            self.body.len()
        );
        if let Some(allow) = self.allow {
            head.push_str("Allow: ");
            head.push_str(allow);
            head.push_str("\r\n");
        }
        if close {
            head.push_str("Connection: close\r\n");
        }
        head.push_str("\r\n");

        writer.write_all(head.as_bytes()).await?;
        writer.write_all(&self.body).await?;
        writer.flush().await
    }
}
