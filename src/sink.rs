//! Destinations for rendered pages.
//!
//! A render call streams HTML into an [`OutputSink`]. When the call fails,
//! the sink is told so through [`OutputSink::fail`] with a status the
//! surrounding request layer can map onto its own response, in the manner
//! of an HTTP status code.

use std::io::{self, Write};

/// Outcome signalled to a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Ok,
    /// The requested group does not exist
    InternalError,
    /// The template is missing from its group or failed while executing
    NotFound,
}

impl RenderStatus {
    /// HTTP-style status code.
    pub fn code(&self) -> u16 {
        match self {
            RenderStatus::Ok => 200,
            RenderStatus::InternalError => 500,
            RenderStatus::NotFound => 404,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RenderStatus::Ok)
    }
}

/// A writer that can also be told that rendering failed.
pub trait OutputSink: Write {
    /// Records a failed render. `message` describes the failure.
    fn fail(&mut self, status: RenderStatus, message: &str);
}

/// In-memory sink recording the status and the written bytes.
#[derive(Debug, Clone)]
pub struct BufferSink {
    status: RenderStatus,
    body: Vec<u8>,
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferSink {
    pub fn new() -> Self {
        Self { status: RenderStatus::Ok, body: Vec::new() }
    }

    pub fn status(&self) -> RenderStatus {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, lossily decoded.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

impl Write for BufferSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl OutputSink for BufferSink {
    fn fail(&mut self, status: RenderStatus, message: &str) {
        self.status = status;
        self.body.extend_from_slice(message.as_bytes());
        self.body.push(b'\n');
    }
}

/// Sink streaming into any writer. A failure is remembered, not written.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
    status: RenderStatus,
    message: Option<String>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, status: RenderStatus::Ok, message: None }
    }

    pub fn status(&self) -> RenderStatus {
        self.status
    }

    /// Message of the last failure, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for WriterSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn fail(&mut self, status: RenderStatus, message: &str) {
        self.status = status;
        self.message = Some(message.to_string());
    }
}
