use chrono::{DateTime, Utc};
use glob::{glob, Pattern, PatternError};
use std::fs;
use std::io;
use std::path::Path;

/// A fetchable file in a transfer location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDetail {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    /// Weak entity tag derived from modification time and size.
    pub etag: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Transfer location '{0}' is not a directory")]
    MissingDirectory(String),
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlobPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
}

/// List the non-empty regular files directly under `dir`, oldest first.
///
/// Entries that cannot be inspected (dangling links, files removed mid-scan,
/// non UTF-8 names) are skipped with a warning.
pub fn list_objects(dir: &Path) -> Result<Vec<ObjectDetail>, ListingError> {
    if !dir.is_dir() {
        return Err(ListingError::MissingDirectory(dir.display().to_string()));
    }

    let escaped = Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("*").to_string_lossy().into_owned();
    let entries = glob(&pattern).map_err(|err| ListingError::InvalidGlobPattern {
        pattern: pattern.clone(),
        source: err,
    })?;

    let mut objects = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(
                    path = %err.path().display(),
                    error = %err.error(),
                    "skipping unreadable entry"
                );
                continue;
            }
        };
        match describe(&path) {
            Ok(Some(object)) => objects.push(object),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable entry");
            }
        }
    }

    objects.sort_by(|a, b| {
        a.last_modified
            .cmp(&b.last_modified)
            .then_with(|| a.key.cmp(&b.key))
    });
    tracing::debug!(dir = %dir.display(), count = objects.len(), "listed transfer location");
    Ok(objects)
}

fn describe(path: &Path) -> io::Result<Option<ObjectDetail>> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() || metadata.len() == 0 {
        return Ok(None);
    }
    let Some(key) = path.file_name().and_then(|name| name.to_str()) else {
        tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name");
        return Ok(None);
    };
    let last_modified = DateTime::<Utc>::from(metadata.modified()?);
    Ok(Some(ObjectDetail {
        key: key.to_string(),
        size: metadata.len(),
        etag: format!("{:x}-{:x}", last_modified.timestamp(), metadata.len()),
        last_modified,
    }))
}

/// Most recently modified non-empty object, if any.
pub fn find_latest(objects: &[ObjectDetail]) -> Option<&ObjectDetail> {
    objects
        .iter()
        .filter(|object| object.size > 0)
        .max_by_key(|object| object.last_modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use chrono::TimeZone;
    use std::fs::File;
    use std::time::{Duration, SystemTime};

    fn write_with_mtime(dir: &Path, name: &str, body: &str, secs: u64) {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        let file = File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    fn object(key: &str, size: u64, hour: u32) -> ObjectDetail {
        ObjectDetail {
            key: key.to_string(),
            size,
            last_modified: Utc.with_ymd_and_hms(2025, 1, 27, hour, 0, 0).unwrap(),
            etag: String::new(),
        }
    }

    #[test]
    fn latest_of_empty_listing_is_none() {
        assert_eq!(find_latest(&[]), None);
    }

    #[test]
    fn latest_skips_empty_objects() {
        let objects = vec![
            object("remote-send-1.txt", 10, 8),
            object("remote-send-2.zip", 0, 12),
            object("remote-send-3.txt", 5, 10),
        ];
        let latest = find_latest(&objects).unwrap();
        assert_eq!(latest.key, "remote-send-3.txt");
    }

    #[test]
    fn latest_is_none_when_everything_is_empty() {
        let objects = vec![object("remote-send-1.txt", 0, 8)];
        assert_eq!(find_latest(&objects), None);
    }

    #[test]
    fn lists_only_non_empty_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("remote-send-1.txt").write_str("hello").unwrap();
        temp.child("remote-send-2.zip").touch().unwrap();
        temp.child("nested").create_dir_all().unwrap();
        temp.child("nested/remote-send-3.txt")
            .write_str("deep")
            .unwrap();

        let objects = list_objects(temp.path()).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].key, "remote-send-1.txt");
        assert_eq!(objects[0].size, 5);
    }

    #[test]
    fn escapes_glob_characters_in_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let odd = temp.child("drop[1]");
        odd.create_dir_all().unwrap();
        odd.child("remote-send.txt").write_str("x").unwrap();

        let objects = list_objects(odd.path()).unwrap();
        assert_eq!(objects.len(), 1);
    }

    #[test]
    fn rejects_missing_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let result = list_objects(&temp.path().join("absent"));
        assert!(matches!(result, Err(ListingError::MissingDirectory(_))));
    }

    #[test]
    fn lists_oldest_first() {
        let temp = assert_fs::TempDir::new().unwrap();
        write_with_mtime(temp.path(), "remote-send-b.txt", "new", 1_700_000_300);
        write_with_mtime(temp.path(), "remote-send-a.txt", "old", 1_700_000_100);
        write_with_mtime(temp.path(), "remote-send-c.zip", "mid", 1_700_000_200);

        let keys: Vec<_> = list_objects(temp.path())
            .unwrap()
            .into_iter()
            .map(|object| object.key)
            .collect();
        assert_eq!(
            keys,
            ["remote-send-a.txt", "remote-send-c.zip", "remote-send-b.txt"]
        );
    }

    #[test]
    fn equal_mtimes_fall_back_to_key_order() {
        let temp = assert_fs::TempDir::new().unwrap();
        write_with_mtime(temp.path(), "zeta.txt", "z", 1_700_000_000);
        write_with_mtime(temp.path(), "alpha.txt", "a", 1_700_000_000);

        let objects = list_objects(temp.path()).unwrap();
        assert_eq!(objects[0].key, "alpha.txt");
        assert_eq!(objects[1].key, "zeta.txt");
        assert_eq!(objects[0].etag, format!("{:x}-1", 1_700_000_000));
    }

    #[cfg(unix)]
    #[test]
    fn skips_dangling_symlinks() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("remote-send-1.txt").write_str("hello").unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("stale")).unwrap();

        let objects = list_objects(temp.path()).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].key, "remote-send-1.txt");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("remote-send-1.txt").write_str("hello").unwrap();
        fs::write(
            temp.path().join(OsStr::from_bytes(b"remote-send-\xff.txt")),
            "bytes",
        )
        .unwrap();

        let objects = list_objects(temp.path()).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].key, "remote-send-1.txt");
    }
}
