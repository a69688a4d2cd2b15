use std::io::ErrorKind;
use std::path::Path;

use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::handler::{CHUNK_SIZE, Reply, resolve};
use crate::http::error::RequestError;
use crate::http::request::Uri;
use crate::http::writer::serialize_file_head;

/// Serves the file `uri` names under `root`.
///
/// Checks run in order: missing path is 404, a directory or unreadable file is
/// 403, any other open failure is 500. Nothing is written to `stream` until
/// the file is open.
///
/// Content-Length is the size seen by the initial `metadata` call and is not
/// checked again while streaming. Once the head is sent, a write failure ends
/// the transfer with `NetworkWriteFailure` and a read failure just stops it, so
/// the client may see fewer bytes than announced.
pub async fn serve_file<S>(stream: &mut S, root: &Path, uri: &Uri) -> Result<Reply, RequestError>
where
    S: AsyncWrite + Unpin,
{
    let path = resolve(root, uri);

    let metadata = fs::metadata(&path)
        .await
        .map_err(|_| RequestError::PathNotFound)?;

    if metadata.is_dir() {
        return Err(RequestError::PathForbidden);
    }

    let mut file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(RequestError::PathForbidden);
        }
        Err(e) => return Err(RequestError::FilesystemIo(e)),
    };

    let content_length = metadata.len();
    stream
        .write_all(&serialize_file_head(content_length))
        .await
        .map_err(RequestError::NetworkWriteFailure)?;

    let mut chunk = [0u8; CHUNK_SIZE];
    let mut sent: u64 = 0;

    loop {
        let n = match file.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                warn!(uri = %uri, error = %e, sent, "error reading file, response truncated");
                break;
            }
        };

        // write_all loops over partial writes
        stream
            .write_all(&chunk[..n])
            .await
            .map_err(RequestError::NetworkWriteFailure)?;
        sent += n as u64;
    }

    stream
        .flush()
        .await
        .map_err(RequestError::NetworkWriteFailure)?;

    if sent != content_length {
        debug!(uri = %uri, sent, content_length, "file size changed while serving");
    }

    Ok(Reply::Streamed(sent))
}
