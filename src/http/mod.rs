//! HTTP protocol implementation.
//!
//! This module implements the restricted HTTP/1.1 subset the server speaks:
//! one request per connection, `GET` and `PUT` only, bodies framed by
//! Content-Length.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Request-line and Content-Length grammars
//! - **`request`**: Bounded request types (`Method`, `Uri`, `Request`)
//! - **`response`**: The fixed status-code vocabulary
//! - **`writer`**: Serializes and sends status-only responses
//! - **`error`**: `RequestError` and its status mapping
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │   ReadHeader     │ ← Read up to "\r\n\r\n" (4096 bytes max)
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │ ParseRequestLine │ ← METHOD SP URI SP VERSION CRLF
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │ ValidateVersion  │ ← exactly HTTP/1.1, else 505
//!        └──────┬───────────┘
//!               │ PUT only
//!               ▼
//!        ┌──────────────────┐
//!        │    ReadBody      │ ← Content-Length, exact-count read
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │    Dispatch      │ ← GET / PUT / 501
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │  SendResponse    │ ← skipped when GET already streamed
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! Any failure jumps straight to `SendResponse` with its status code, or to
//! `Closed` if the client can no longer be written to.
//!
//! # Example
//!
//! ```ignore
//! use filebox::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         Connection::new(socket, ".").run().await;
//!     }
//! }
//! ```

pub mod connection;
pub mod error;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
