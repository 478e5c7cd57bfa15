//! The unified [`Path`] type
//!
//! A `Path` is either a plain filesystem location or a location inside a zip
//! archive. Construction and [`Path::join`] are the only places the variant is
//! decided: both run the archive boundary detector over the resulting string,
//! so `Path::new("x.zip/inner")` and `Path::new("x.zip").join("inner")` settle
//! to the same value.

mod archive;
mod boundary;
pub mod plain;

pub use archive::ArchivePath;
pub use boundary::find_boundary;
pub use plain::PlainPath;

use crate::workdir::WorkingDir;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Div;
use std::str::FromStr;

/// Native path separator
pub const SEP: char = std::path::MAIN_SEPARATOR;

/// Separators accepted when splitting path strings
pub(crate) fn is_sep(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

/// A filesystem path or an archive entry path
#[derive(Clone)]
pub enum Path {
    Plain(PlainPath),
    Archive(ArchivePath),
}

impl Path {
    /// Resolve a path string, switching to [`Path::Archive`] when a prefix of
    /// it is a zip archive
    pub fn new(path: impl AsRef<str>) -> Self {
        boundary::resolve(path.as_ref())
    }

    /// Join `segments` with the native separator and resolve the result
    ///
    /// No segments at all yields the current directory, `"."`.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments = segments.into_iter();
        let first = match segments.next() {
            Some(first) => first.as_ref().to_string(),
            None => return Self::default(),
        };
        let joined = segments.fold(first, |acc, seg| plain::join(&acc, seg.as_ref()));
        Self::new(joined)
    }

    /// Build an archive path from its parts without probing
    pub fn from_parts(
        location: impl Into<String>,
        password: Option<&str>,
        entry: impl AsRef<str>,
    ) -> Self {
        Path::Archive(ArchivePath::from_parts(location, password, entry))
    }

    /// String form, exactly as constructed or joined
    pub fn as_str(&self) -> &str {
        match self {
            Path::Plain(p) => p.as_str(),
            Path::Archive(a) => a.as_str(),
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, Path::Archive(_))
    }

    pub fn as_plain(&self) -> Option<&PlainPath> {
        match self {
            Path::Plain(p) => Some(p),
            Path::Archive(_) => None,
        }
    }

    pub fn as_archive(&self) -> Option<&ArchivePath> {
        match self {
            Path::Plain(_) => None,
            Path::Archive(a) => Some(a),
        }
    }

    /// Append a segment
    ///
    /// A plain result is re-probed, since the new segment may cross into an
    /// archive. An archive path only ever grows its entry name.
    pub fn join(&self, segment: impl AsRef<str>) -> Path {
        match self {
            Path::Plain(p) => Path::new(plain::join(p.as_str(), segment.as_ref())),
            Path::Archive(a) => Path::Archive(a.join(segment.as_ref())),
        }
    }

    /// Final segment; for an archive root, the archive's file name
    pub fn basename(&self) -> &str {
        match self {
            Path::Plain(p) => p.basename(),
            Path::Archive(a) => a.basename(),
        }
    }

    /// Everything but the final segment
    pub fn dirname(&self) -> Path {
        match self {
            Path::Plain(p) => Path::Plain(p.dirname()),
            Path::Archive(a) => a.dirname(),
        }
    }

    pub fn is_abs(&self) -> bool {
        match self {
            Path::Plain(p) => p.is_abs(),
            Path::Archive(a) => a.is_abs(),
        }
    }

    /// Lexically normalized form
    pub fn normpath(&self) -> Path {
        match self {
            // Collapsing `missing/..` can expose an archive prefix
            Path::Plain(p) => Path::new(plain::normpath(p.as_str())),
            Path::Archive(a) => {
                // Rooted so that `..` stops at the archive root
                let entry = plain::normpath(&format!("/{}", a.entry_name()));
                Path::Archive(ArchivePath::from_parts(
                    plain::normpath(a.location()),
                    a.password(),
                    entry,
                ))
            }
        }
    }

    /// Split at the extension of the final segment
    pub fn splitext(&self) -> (&str, &str) {
        plain::splitext(self.as_str())
    }

    /// Final segment without its extension
    pub fn stem(&self) -> &str {
        plain::splitext(self.basename()).0
    }

    /// Extension of the final segment, including the dot
    pub fn extension(&self) -> &str {
        plain::splitext(self.basename()).1
    }

    /// Working-directory handle targeting this path
    pub fn cd(&self) -> WorkingDir {
        WorkingDir::new(self.clone())
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::Plain(PlainPath::new("."))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Path::Plain(p) => write!(f, "Path('{}')", p.as_str()),
            Path::Archive(a) => write!(f, "ArchivePath('{}')", a.as_str()),
        }
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Path {}

impl PartialEq<str> for Path {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Path {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for Path {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialOrd for Path {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Path {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Path::new(path)
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Path::new(path)
    }
}

impl From<PlainPath> for Path {
    fn from(path: PlainPath) -> Self {
        Path::Plain(path)
    }
}

impl From<ArchivePath> for Path {
    fn from(path: ArchivePath) -> Self {
        Path::Archive(path)
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::new(s))
    }
}

impl<S: AsRef<str>> Div<S> for Path {
    type Output = Path;

    fn div(self, segment: S) -> Path {
        self.join(segment)
    }
}

impl<S: AsRef<str>> Div<S> for &Path {
    type Output = Path;

    fn div(self, segment: S) -> Path {
        self.join(segment)
    }
}

// Passwords are never written out; a deserialized path is resolved afresh
impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Path::new(raw))
    }
}
