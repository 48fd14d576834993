//! Sending files into a transfer location and fetching the latest one back out.

use crate::constants::{NO_REMOTE_FILES, TRANSFER_CHUNK_SIZE};
use crate::listing::{find_latest, list_objects, ListingError, ObjectDetail};
use crate::naming::path_concat;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

#[derive(Debug)]
pub struct TransferOutcome {
    pub destination: PathBuf,
    pub bytes: u64,
    pub elapsed: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("File does not exist: {0}")]
    MissingSource(String),
    #[error("Cannot derive a file name from '{0}'")]
    UnnamedSource(String),
    #[error("Transfer location '{0}' is not a directory")]
    MissingLocation(String),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error("{}", NO_REMOTE_FILES)]
    NoRemoteFiles,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Copy `source` into the transfer location under its own file name.
pub fn send_file(
    source: &Path,
    location: &Path,
    on_progress: impl FnMut(u64),
) -> Result<TransferOutcome, TransferError> {
    if !source.is_file() {
        return Err(TransferError::MissingSource(source.display().to_string()));
    }
    if !location.is_dir() {
        return Err(TransferError::MissingLocation(location.display().to_string()));
    }
    let key = source
        .file_name()
        .ok_or_else(|| TransferError::UnnamedSource(source.display().to_string()))?;

    let destination = location.join(key);
    let started = Instant::now();
    let bytes = copy_atomic(source, &destination, on_progress)?;
    tracing::debug!(destination = %destination.display(), bytes, "sent file");
    Ok(TransferOutcome {
        destination,
        bytes,
        elapsed: started.elapsed(),
    })
}

/// Copy the most recently modified object in `location` into `target`.
///
/// The destination is `path_concat(target, key)`; `target` is created if missing.
pub fn fetch_latest(
    location: &Path,
    target: &str,
    on_progress: impl FnMut(u64),
) -> Result<(ObjectDetail, TransferOutcome), TransferError> {
    let objects = list_objects(location)?;
    let latest = find_latest(&objects)
        .cloned()
        .ok_or(TransferError::NoRemoteFiles)?;

    fs::create_dir_all(target)?;
    let destination = PathBuf::from(path_concat(target, &latest.key));
    let started = Instant::now();
    let bytes = copy_atomic(&location.join(&latest.key), &destination, on_progress)?;
    tracing::debug!(destination = %destination.display(), bytes, etag = %latest.etag, "fetched file");
    Ok((
        latest,
        TransferOutcome {
            destination,
            bytes,
            elapsed: started.elapsed(),
        },
    ))
}

/// Stream `source` into a temp file beside `destination`, then rename it into place.
fn copy_atomic(
    source: &Path,
    destination: &Path,
    mut on_progress: impl FnMut(u64),
) -> io::Result<u64> {
    let parent = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut reader = File::open(source)?;
    let mut temp = NamedTempFile::new_in(parent)?;
    let mut buffer = vec![0u8; TRANSFER_CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        temp.write_all(&buffer[..read])?;
        total += read as u64;
        on_progress(total);
    }
    temp.flush()?;
    temp.persist(destination).map_err(|e| e.error)?;
    Ok(total)
}
