//! Path joining and classification of files produced by a send.

use crate::constants::{REMOTE_PREFIX, TEXT_SUFFIX, ZIP_SUFFIX};
use std::fmt;

/// Join `file` onto `parent`, reusing the separator style already in `parent`.
///
/// Any forward slash selects `/`; otherwise the join uses `\`.
pub fn path_concat(parent: &str, file: &str) -> String {
    if parent.contains('/') {
        format!("{parent}/{file}")
    } else {
        format!("{parent}\\{file}")
    }
}

pub fn is_text(name: &str) -> bool {
    name.starts_with(REMOTE_PREFIX) && name.ends_with(TEXT_SUFFIX)
}

pub fn is_zipped(name: &str) -> bool {
    name.starts_with(REMOTE_PREFIX) && name.ends_with(ZIP_SUFFIX)
}

/// How a downloaded file should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKind {
    Text,
    Zipped,
    Other,
}

impl RemoteKind {
    pub fn classify(name: &str) -> Self {
        if is_text(name) {
            RemoteKind::Text
        } else if is_zipped(name) {
            RemoteKind::Zipped
        } else {
            RemoteKind::Other
        }
    }
}

impl fmt::Display for RemoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RemoteKind::Text => "text",
            RemoteKind::Zipped => "zip",
            RemoteKind::Other => "other",
        };
        f.write_str(label)
    }
}
