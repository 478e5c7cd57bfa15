//! Archive boundary detection
//!
//! Walks the prefixes of a path string from left to right and stops at the
//! first one that is a real zip archive on disk.

use super::archive::ArchivePath;
use super::plain::PlainPath;
use super::{is_sep, Path};
use crate::archive::is_zip_archive;
use std::fs;

/// Split `path` at its archive boundary: `(archive_location, entry_name)`
///
/// Returns `None` when no prefix names a zip archive. The entry part is
/// returned as written; callers normalize it.
pub fn find_boundary(path: &str) -> Option<(&str, &str)> {
    let ends = path
        .char_indices()
        .filter(|&(_, c)| is_sep(c))
        .map(|(idx, _)| idx)
        .chain(std::iter::once(path.len()));

    for end in ends {
        let prefix = &path[..end];
        // The root and runs of separators add nothing new to probe
        if prefix.is_empty() || prefix.ends_with(is_sep) {
            continue;
        }

        match fs::metadata(prefix) {
            Ok(meta) if meta.is_dir() => continue,
            Ok(meta) if meta.is_file() && is_zip_archive(prefix) => {
                let entry = path[end..].trim_start_matches(is_sep);
                return Some((prefix, entry));
            }
            // A non-archive file or a missing prefix: nothing deeper can exist
            _ => return None,
        }
    }

    None
}

/// Resolve a path string to its variant
pub fn resolve(path: &str) -> Path {
    match find_boundary(path) {
        Some((location, entry)) => {
            tracing::debug!(path, location, entry, "archive boundary detected");
            Path::Archive(ArchivePath::from_parts(location, None, entry))
        }
        None => Path::Plain(PlainPath::new(path)),
    }
}
