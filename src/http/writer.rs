use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::http::response::{Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Codes outside the fixed set get the status line only
    if let Some(len) = resp.content_length() {
        buf.extend_from_slice(format!("Content-Length: {}\r\n\r\n", len).as_bytes());
        buf.extend_from_slice(&resp.body);
    }

    buf
}

/// Serializes the head of a successful GET whose body is streamed separately.
pub fn serialize_file_head(content_length: u64) -> Vec<u8> {
    format!(
        "{} {} {}\r\nContent-Length: {}\r\n\r\n",
        HTTP_VERSION,
        StatusCode::Ok.as_u16(),
        StatusCode::Ok.reason_phrase(),
        content_length
    )
    .into_bytes()
}

/// Writes a status-only response and closes the write side of the stream.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    /// The exact bytes this writer sends.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Makes a single write attempt, then shuts the stream down.
    ///
    /// A short or failed write is logged and not retried. The shutdown happens
    /// whatever the write outcome. Returns the number of bytes accepted.
    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> usize
    where
        S: AsyncWrite + Unpin,
    {
        match stream.write(&self.buffer[self.written..]).await {
            Ok(n) => {
                self.written += n;
                if self.written < self.buffer.len() {
                    warn!(
                        written = self.written,
                        expected = self.buffer.len(),
                        "response not fully written"
                    );
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to send response");
            }
        }

        if let Err(e) = stream.shutdown().await {
            debug!(error = %e, "shutdown after response failed");
        }

        self.written
    }
}
