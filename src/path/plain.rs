//! Filesystem-side path strings
//!
//! The free functions here are purely lexical: they never touch the
//! filesystem and follow the usual platform path-string conventions
//! (`dirname("path") == ""`, `join("a", "/b") == "/b"`, ...).

use super::{is_sep, SEP};
use std::fmt;

/// A filesystem location, relative or absolute, possibly non-existent
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlainPath {
    path: String,
}

impl PlainPath {
    /// Wrap a string without probing for archive boundaries
    pub(crate) fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// View as a standard library path for direct filesystem calls
    pub fn as_std_path(&self) -> &std::path::Path {
        std::path::Path::new(&self.path)
    }

    pub fn basename(&self) -> &str {
        basename(&self.path)
    }

    pub fn dirname(&self) -> PlainPath {
        PlainPath::new(dirname(&self.path))
    }

    pub fn is_abs(&self) -> bool {
        self.as_std_path().is_absolute()
    }
}

impl fmt::Display for PlainPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl fmt::Debug for PlainPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlainPath('{}')", self.path)
    }
}

/// Final segment: everything after the last separator
pub fn basename(path: &str) -> &str {
    match path.rfind(is_sep) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Everything before the final segment, with trailing separators removed
/// unless the result is the root itself
pub fn dirname(path: &str) -> &str {
    let head = match path.rfind(is_sep) {
        Some(idx) => &path[..idx + 1],
        None => return "",
    };

    let trimmed = head.trim_end_matches(is_sep);
    if trimmed.is_empty() {
        head
    } else {
        trimmed
    }
}

/// Join one segment onto `base`; an absolute segment replaces the base
pub fn join(base: &str, segment: &str) -> String {
    if std::path::Path::new(segment).has_root() || base.is_empty() {
        return segment.to_string();
    }
    if base.ends_with(is_sep) {
        format!("{}{}", base, segment)
    } else {
        format!("{}{}{}", base, SEP, segment)
    }
}

/// Lexically collapse `.`, `..` and repeated separators
pub fn normpath(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with(is_sep);
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split(is_sep) {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // ".." above the root is the root
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let body = parts.join(&SEP.to_string());
    match (absolute, body.is_empty()) {
        (true, _) => format!("{}{}", SEP, body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

/// Split the final segment at its last dot: `("dir/file", ".txt")`
///
/// Leading dots (hidden files) never start an extension.
pub fn splitext(path: &str) -> (&str, &str) {
    let name = basename(path);
    let name_start = path.len() - name.len();

    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => {
            let split = name_start + dot;
            (&path[..split], &path[split..])
        }
        _ => (path, ""),
    }
}
