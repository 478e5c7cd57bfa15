use super::plain::{self, PlainPath};
use super::{is_sep, Path, SEP};
use crate::archive::{is_zip_archive, normalize_entry_name, ArchiveIndex};
use crate::error::{PathError, Result};
use std::fmt;

/// A location inside a zip archive
///
/// Holds the archive's filesystem location and the slash-separated entry name
/// beneath it. An empty entry name is the archive root.
#[derive(Clone)]
pub struct ArchivePath {
    location: String,
    entry: String,
    password: Option<String>,
    rendered: String,
}

impl ArchivePath {
    /// Open the archive root at `location`, probing that it really is a zip archive
    pub fn open(location: impl Into<String>) -> Result<Self> {
        let location = location.into();
        if !is_zip_archive(&location) {
            return Err(PathError::NotAnArchive(location));
        }
        Ok(Self::from_parts(location, None, ""))
    }

    /// Build directly from its parts without probing the archive
    ///
    /// The caller asserts that `location` names a zip archive. The password is
    /// only handed to the archive reader when encrypted entries are read.
    pub fn from_parts(
        location: impl Into<String>,
        password: Option<&str>,
        entry: impl AsRef<str>,
    ) -> Self {
        let location = location.into();
        let entry = normalize_entry_name(entry.as_ref());
        let rendered = render(&location, &entry);
        Self {
            location,
            entry,
            password: password.map(str::to_string),
            rendered,
        }
    }

    /// Provide the password used to decrypt entries
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Filesystem location of the archive file
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Slash-separated name inside the archive (empty for the root)
    pub fn entry_name(&self) -> &str {
        &self.entry
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.entry.is_empty()
    }

    /// The archive file itself, as a plain filesystem path
    pub fn archive_file(&self) -> PlainPath {
        PlainPath::new(self.location.clone())
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    /// Append to the entry name; the archive location never changes
    pub fn join(&self, segment: &str) -> ArchivePath {
        let segment = segment.trim_start_matches(is_sep);
        let entry = if self.entry.is_empty() {
            segment.to_string()
        } else {
            format!("{}/{}", self.entry, segment)
        };
        Self::from_parts(self.location.clone(), self.password(), entry)
    }

    pub fn basename(&self) -> &str {
        match self.entry.rfind('/') {
            Some(idx) => &self.entry[idx + 1..],
            None if !self.entry.is_empty() => &self.entry,
            None => plain::basename(&self.location),
        }
    }

    /// One level up: the containing directory for the root, otherwise the
    /// parent entry (which may be the archive root)
    pub fn dirname(&self) -> Path {
        if self.entry.is_empty() {
            return Path::Plain(self.archive_file().dirname());
        }
        let parent = match self.entry.rfind('/') {
            Some(idx) => &self.entry[..idx],
            None => "",
        };
        Path::Archive(Self::from_parts(self.location.clone(), self.password(), parent))
    }

    pub fn is_abs(&self) -> bool {
        self.archive_file().is_abs()
    }

    /// Read the archive's entry index (opens and closes the archive)
    pub fn index(&self) -> Result<ArchiveIndex> {
        ArchiveIndex::load(&self.location, self.password())
    }
}

fn render(location: &str, entry: &str) -> String {
    if entry.is_empty() {
        return location.to_string();
    }
    let entry = if SEP == '/' {
        entry.to_string()
    } else {
        entry.replace('/', &SEP.to_string())
    };
    plain::join(location, &entry)
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl fmt::Debug for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArchivePath('{}')", self.rendered)
    }
}
