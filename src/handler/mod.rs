//! Method handlers
//!
//! GET streams a file to the client; PUT stores an assembled body. Both map a
//! validated URI onto a file directly inside the serving root.

pub mod get;
pub mod put;

use std::path::{Path, PathBuf};

use crate::http::request::Uri;
use crate::http::response::StatusCode;

pub use get::serve_file;
pub use put::store_file;

/// Size of the chunks a file is streamed in.
pub const CHUNK_SIZE: usize = 4096;

/// How a handler finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// A status-only response still has to be sent
    Status(StatusCode),
    /// The handler already wrote a full response of this many body bytes
    Streamed(u64),
}

/// Maps a URI to its file: the leading slash is dropped and the rest joined to
/// `root` as is.
pub fn resolve(root: &Path, uri: &Uri) -> PathBuf {
    root.join(uri.file_name())
}
