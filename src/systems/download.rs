//! Writing downloaded result sets to disk.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use usersearch_api::{ApiError, DownloadRequest, SearchBackend};

/// File name the backend payload is saved under unless configured otherwise.
pub const DEFAULT_DOWNLOAD_FILE: &str = "user_results.json";

/// A payload that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDownload {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DownloadError {
    fn write(path: &Path, source: io::Error) -> Self {
        DownloadError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Stream the full filtered result set for `request` into `target`.
///
/// Parent directories are created as needed. The body is written to a sibling
/// `.part` file and renamed into place once complete; on any failure the
/// `.part` file is removed and an existing `target` is left untouched.
pub fn fetch_to_file(
    backend: &dyn SearchBackend,
    request: &DownloadRequest,
    target: &Path,
) -> Result<SavedDownload, DownloadError> {
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| DownloadError::write(parent, source))?;
    }

    let partial = partial_path(target);
    match stream_into(backend, request, &partial).and_then(|bytes| {
        fs::rename(&partial, target).map_err(|source| DownloadError::write(target, source))?;
        Ok(bytes)
    }) {
        Ok(bytes) => {
            info!(path = %target.display(), bytes, "saved download");
            Ok(SavedDownload {
                path: target.to_path_buf(),
                bytes,
            })
        }
        Err(err) => {
            discard_partial(&partial);
            Err(err)
        }
    }
}

fn stream_into(
    backend: &dyn SearchBackend,
    request: &DownloadRequest,
    partial: &Path,
) -> Result<u64, DownloadError> {
    let file = File::create(partial).map_err(|source| DownloadError::write(partial, source))?;
    let mut sink = BufWriter::new(file);
    let bytes = backend.download(request, &mut sink)?;
    let file = sink
        .into_inner()
        .map_err(|err| DownloadError::write(partial, err.into_error()))?;
    file.sync_all()
        .map_err(|source| DownloadError::write(partial, source))?;
    Ok(bytes)
}

fn partial_path(target: &Path) -> PathBuf {
    let mut partial = OsString::from(target.as_os_str());
    partial.push(".part");
    PathBuf::from(partial)
}

fn discard_partial(partial: &Path) {
    if let Err(err) = fs::remove_file(partial)
        && err.kind() != io::ErrorKind::NotFound
    {
        warn!(path = %partial.display(), error = %err, "could not remove partial download");
    }
}
