//! Minimal two-phase HTTP response model.
//!
//! A response starts as a [`PendingResponse`], where status and headers are
//! still settable. [`PendingResponse::commit`] writes the status line and
//! headers to the sink exactly once and hands back a [`CommittedResponse`],
//! which only supports appending body bytes. No code path can touch status or
//! headers after commit; the type system enforces the phase split.

use std::io::{self, Write};

use tracing::warn;

/// An incoming HTTP request, reduced to what format negotiation needs:
/// method, path, insertion-ordered headers, and query parameters.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// First query parameter with the given name (exact match).
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Reason phrase for the status codes this crate emits.
fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        406 => "Not Acceptable",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// A response whose headers have not been sent yet. Status and headers are
/// only mutable in this phase.
#[derive(Debug, Clone)]
pub struct PendingResponse {
    status: u16,
    headers: Vec<(String, String)>,
}

impl PendingResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Write the status line and headers to `sink` and move to the committed
    /// phase. A transport failure here is latched: the head is not retried
    /// and every later body write fails fast, so encoders stop consuming
    /// their source promptly.
    pub fn commit<W: Write>(self, sink: W) -> CommittedResponse<W> {
        let mut committed = CommittedResponse {
            status: self.status,
            headers: self.headers,
            sink,
            failed: false,
        };
        if let Err(e) = committed.write_head() {
            warn!("failed to send response headers: {e}");
            committed.failed = true;
        }
        committed
    }
}

/// A response whose status line and headers are already on the wire. Only
/// body appends remain; the `Write` impl is the body sink.
pub struct CommittedResponse<W: Write> {
    status: u16,
    headers: Vec<(String, String)>,
    sink: W,
    failed: bool,
}

impl<W: Write> CommittedResponse<W> {
    fn write_head(&mut self) -> io::Result<()> {
        write!(
            self.sink,
            "HTTP/1.1 {} {}\r\n",
            self.status,
            reason_phrase(self.status)
        )?;
        for (name, value) in &self.headers {
            write!(self.sink, "{name}: {value}\r\n")?;
        }
        self.sink.write_all(b"\r\n")
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Consume the committed response, leaving the immutable summary.
    pub fn finish(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
        }
    }
}

impl<W: Write> Write for CommittedResponse<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failed {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "response transport already failed",
            ));
        }
        self.sink.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.failed {
            return Ok(());
        }
        self.sink.flush()
    }
}

/// Summary of a response whose headers (and body) have already been sent.
/// Status and headers are immutable here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
}

impl Response {
    pub fn status(&self) -> u16 {
        self.status
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}
