use std::path::PathBuf;

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::handler::{Reply, serve_file, store_file};
use crate::http::error::RequestError;
use crate::http::parser::{HEADER_TERMINATOR, find_headers_end, parse_content_length, parse_request_line};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

/// Capacity of the header buffer. A header section that does not fit is rejected.
pub const HEADER_CAPACITY: usize = 4096;

/// Handles exactly one request on one stream, then closes it.
///
/// The stream is owned by the connection and `run` consumes the connection,
/// so the stream is dropped exactly once whichever way the request ends.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    head_len: usize,
    root: PathBuf,
    state: ConnectionState,
}

pub enum ConnectionState {
    ReadHeader,
    ParseRequestLine,
    ValidateVersion(Request),
    ReadBody(Request),
    Dispatch(Request),
    SendResponse(StatusCode),
    Closed,
}

impl ConnectionState {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionState::ReadHeader => "read_header",
            ConnectionState::ParseRequestLine => "parse_request_line",
            ConnectionState::ValidateVersion(_) => "validate_version",
            ConnectionState::ReadBody(_) => "read_body",
            ConnectionState::Dispatch(_) => "dispatch",
            ConnectionState::SendResponse(_) => "send_response",
            ConnectionState::Closed => "closed",
        }
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// `root` is the directory URIs are resolved against.
    pub fn new(stream: S, root: impl Into<PathBuf>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(HEADER_CAPACITY),
            head_len: 0,
            root: root.into(),
            state: ConnectionState::ReadHeader,
        }
    }

    /// Drives the request to completion.
    ///
    /// Returns the status the client was sent, or `None` if the connection was
    /// abandoned after a write failure.
    pub async fn run(mut self) -> Option<StatusCode> {
        let mut sent = None;

        loop {
            debug!(state = self.state.name(), "connection state");
            self.state = match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::ReadHeader => match self.read_header().await {
                    Ok(head_len) => {
                        self.head_len = head_len;
                        ConnectionState::ParseRequestLine
                    }
                    Err(e) => Self::fail(e),
                },

                ConnectionState::ParseRequestLine => match parse_request_line(&self.buffer) {
                    Ok(request) => ConnectionState::ValidateVersion(request),
                    Err(e) => Self::fail(e.into()),
                },

                ConnectionState::ValidateVersion(request) => {
                    if !request.is_supported_version() {
                        Self::fail(RequestError::UnsupportedVersion(request.version))
                    } else if request.method == Method::PUT {
                        ConnectionState::ReadBody(request)
                    } else {
                        ConnectionState::Dispatch(request)
                    }
                }

                ConnectionState::ReadBody(mut request) => match self.read_body(&mut request).await {
                    Ok(()) => ConnectionState::Dispatch(request),
                    Err(e) => Self::fail(e),
                },

                ConnectionState::Dispatch(request) => {
                    let method = request.method.clone();
                    let uri = request.uri.clone();

                    match self.dispatch(request).await {
                        Ok(Reply::Status(status)) => {
                            info!(%method, %uri, status = status.as_u16(), "request handled");
                            ConnectionState::SendResponse(status)
                        }
                        Ok(Reply::Streamed(bytes)) => {
                            info!(%method, %uri, status = 200, bytes, "file served");
                            if let Err(e) = self.stream.shutdown().await {
                                debug!(error = %e, "shutdown after file failed");
                            }
                            sent = Some(StatusCode::Ok);
                            ConnectionState::Closed
                        }
                        Err(e) => {
                            debug!(%method, %uri, "dispatch failed");
                            Self::fail(e)
                        }
                    }
                }

                ConnectionState::SendResponse(status) => {
                    let mut writer = ResponseWriter::new(&Response::new(status));
                    writer.write_to_stream(&mut self.stream).await;
                    sent = Some(status);
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        sent
    }

    fn fail(e: RequestError) -> ConnectionState {
        match e.status() {
            Some(status) => {
                warn!(error = %e, status = status.as_u16(), "rejecting request");
                ConnectionState::SendResponse(status)
            }
            None => {
                warn!(error = %e, "abandoning connection");
                ConnectionState::Closed
            }
        }
    }

    /// Reads until the header terminator is buffered, the buffer is full, or
    /// the peer stops sending. Returns the header length, terminator included.
    async fn read_header(&mut self) -> Result<usize, RequestError> {
        loop {
            if let Some(end) = find_headers_end(&self.buffer) {
                return Ok(end + HEADER_TERMINATOR.len());
            }

            let room = HEADER_CAPACITY - self.buffer.len();
            if room == 0 {
                return Err(RequestError::HeaderIncomplete(HEADER_CAPACITY));
            }

            let mut limited = (&mut self.buffer).limit(room);
            let n = self
                .stream
                .read_buf(&mut limited)
                .await
                .map_err(RequestError::HeaderRead)?;

            if n == 0 {
                return Err(RequestError::HeaderIncomplete(self.buffer.len()));
            }
        }
    }

    /// Assembles the PUT body from the bytes already buffered after the header
    /// plus an exact-count read of the rest.
    async fn read_body(&mut self, request: &mut Request) -> Result<(), RequestError> {
        let content_length = parse_content_length(&self.buffer[..self.head_len])?;
        if content_length == 0 {
            return Err(RequestError::ZeroLengthBody);
        }
        request.content_length = content_length;

        let len = usize::try_from(content_length)
            .map_err(|_| RequestError::BodyAllocation(content_length))?;
        let mut body = Vec::new();
        body.try_reserve_exact(len)
            .map_err(|_| RequestError::BodyAllocation(content_length))?;

        // Bytes past the declared length are dropped
        let initial = &self.buffer[self.head_len..];
        body.extend_from_slice(&initial[..initial.len().min(len)]);

        let remaining = len - body.len();
        if remaining > 0 {
            let got = read_n_bytes(&mut self.stream, &mut body, remaining).await;
            if got < remaining {
                return Err(RequestError::ShortBodyRead {
                    expected: content_length,
                    missing: (remaining - got) as u64,
                });
            }
        }

        request.body = Some(body);
        Ok(())
    }

    async fn dispatch(&mut self, request: Request) -> Result<Reply, RequestError> {
        match &request.method {
            Method::GET => serve_file(&mut self.stream, &self.root, &request.uri).await,
            Method::PUT => {
                let body = request
                    .body
                    .as_deref()
                    .ok_or(RequestError::MissingOrInvalidContentLength)?;
                store_file(&self.root, &request.uri, body).await
            }
            Method::Other(method) => Err(RequestError::UnsupportedMethod(method.clone())),
        }
    }
}

/// Appends up to `count` bytes from `stream` to `buf`, returning how many
/// arrived. Fewer than `count` means EOF or a read error.
async fn read_n_bytes<R>(stream: &mut R, buf: &mut Vec<u8>, count: usize) -> usize
where
    R: AsyncRead + Unpin,
{
    let start = buf.len();
    let target = start + count;

    while buf.len() < target {
        let want = target - buf.len();
        let mut limited = (&mut *buf).limit(want);
        match stream.read_buf(&mut limited).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "body read failed");
                break;
            }
        }
    }

    buf.len() - start
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    async fn exchange(root: &std::path::Path, request: &[u8]) -> (Option<StatusCode>, Vec<u8>) {
        let (server, mut client) = duplex(1 << 20);
        client.write_all(request).await.unwrap();
        client.shutdown().await.unwrap();

        let status = Connection::new(server, root).run().await;

        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        (status, response)
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let (status, response) = exchange(dir.path(), b"GET /missing.txt HTTP/1.1\r\n\r\n").await;

        assert_eq!(status, Some(StatusCode::NotFound));
        assert_eq!(response, b"HTTP/1.1 404 Not Found\r\nContent-Length: 10\r\n\r\nNot Found\n");
    }

    #[tokio::test]
    async fn put_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let (status, response) = exchange(
            dir.path(),
            b"PUT /a.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
        )
        .await;

        assert_eq!(status, Some(StatusCode::Created));
        assert_eq!(response, b"HTTP/1.1 201 Created\r\nContent-Length: 8\r\n\r\nCreated\n");
        assert_eq!(std::fs::read(dir.path().join("a.txt")).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn read_n_bytes_fills_exact_count() {
        let (mut tx, mut rx) = duplex(64);
        tx.write_all(b"abcdef").await.unwrap();

        let mut buf = b"xy".to_vec();
        let got = read_n_bytes(&mut rx, &mut buf, 4).await;
        assert_eq!(got, 4);
        assert_eq!(buf, b"xyabcd");
    }

    #[test]
    fn state_names() {
        assert_eq!(ConnectionState::ReadHeader.name(), "read_header");
        assert_eq!(ConnectionState::SendResponse(StatusCode::Ok).name(), "send_response");
        assert_eq!(ConnectionState::Closed.name(), "closed");
    }

    #[tokio::test]
    async fn read_n_bytes_stops_at_eof() {
        let (mut tx, mut rx) = duplex(64);
        tx.write_all(b"abc").await.unwrap();
        drop(tx);

        let mut buf = Vec::new();
        let got = read_n_bytes(&mut rx, &mut buf, 10).await;
        assert_eq!(got, 3);
        assert_eq!(buf, b"abc");
    }
}
