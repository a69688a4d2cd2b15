use std::path::Path;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::handler::{Reply, resolve};
use crate::http::error::RequestError;
use crate::http::request::Uri;
use crate::http::response::StatusCode;

/// Permission bits for newly created files.
pub const FILE_MODE: u32 = 0o644;

/// Writes `body` to the file `uri` names under `root`, replacing any contents.
///
/// Answers 200 if the file existed beforehand and 201 if it did not. The
/// existence check and the open are separate calls, which is fine while
/// connections are handled one at a time.
pub async fn store_file(root: &Path, uri: &Uri, body: &[u8]) -> Result<Reply, RequestError> {
    let path = resolve(root, uri);
    let existed = match fs::try_exists(&path).await {
        Ok(existed) => existed,
        Err(e) => {
            warn!(uri = %uri, error = %e, "cannot tell whether file exists, assuming new");
            false
        }
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);

    let mut file = options.open(&path).await.map_err(|e| {
        warn!(uri = %uri, error = %e, "cannot open file for writing");
        RequestError::PathForbidden
    })?;

    file.write_all(body).await.map_err(RequestError::FilesystemIo)?;
    // tokio defers the last write until flush; errors surface here
    file.flush().await.map_err(RequestError::FilesystemIo)?;

    let status = if existed {
        StatusCode::Ok
    } else {
        StatusCode::Created
    };
    Ok(Reply::Status(status))
}
