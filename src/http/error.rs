use std::io;

use thiserror::Error;

use crate::http::response::StatusCode;

/// Every way a request can fail.
///
/// Each kind maps to one fixed status code, except `NetworkWriteFailure`, which
/// means the client can no longer be told anything and the connection is dropped.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to read request header: {0}")]
    HeaderRead(#[source] io::Error),

    #[error("header terminator not found within {0} bytes")]
    HeaderIncomplete(usize),

    #[error("malformed request line")]
    MalformedRequestLine,

    #[error("unsupported version {0}")]
    UnsupportedVersion(String),

    #[error("missing or invalid Content-Length")]
    MissingOrInvalidContentLength,

    #[error("zero-length body")]
    ZeroLengthBody,

    #[error("cannot allocate {0} byte body")]
    BodyAllocation(u64),

    #[error("body short by {missing} of {expected} bytes")]
    ShortBodyRead { expected: u64, missing: u64 },

    #[error("path not found")]
    PathNotFound,

    #[error("path forbidden")]
    PathForbidden,

    #[error("filesystem error: {0}")]
    FilesystemIo(#[source] io::Error),

    #[error("method {0} not implemented")]
    UnsupportedMethod(String),

    #[error("failed writing to client: {0}")]
    NetworkWriteFailure(#[source] io::Error),
}

impl RequestError {
    /// Status to answer with, `None` when no response should be attempted.
    pub fn status(&self) -> Option<StatusCode> {
        let status = match self {
            RequestError::HeaderRead(_) => StatusCode::InternalServerError,
            RequestError::HeaderIncomplete(_) => StatusCode::BadRequest,
            RequestError::MalformedRequestLine => StatusCode::BadRequest,
            RequestError::UnsupportedVersion(_) => StatusCode::VersionNotSupported,
            RequestError::MissingOrInvalidContentLength => StatusCode::BadRequest,
            RequestError::ZeroLengthBody => StatusCode::BadRequest,
            RequestError::BodyAllocation(_) => StatusCode::InternalServerError,
            RequestError::ShortBodyRead { .. } => StatusCode::BadRequest,
            RequestError::PathNotFound => StatusCode::NotFound,
            RequestError::PathForbidden => StatusCode::Forbidden,
            RequestError::FilesystemIo(_) => StatusCode::InternalServerError,
            RequestError::UnsupportedMethod(_) => StatusCode::NotImplemented,
            RequestError::NetworkWriteFailure(_) => return None,
        };
        Some(status)
    }
}
