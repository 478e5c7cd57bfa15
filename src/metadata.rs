//! Metadata queries over both path variants
//!
//! [`PathMetadata`] is implemented once for [`PlainPath`] (direct filesystem
//! status calls) and once for [`ArchivePath`] (the archive's entry index).
//! [`Path`] dispatches to whichever variant it holds; it never falls back from
//! one to the other.
//!
//! Predicates (`exists`, `is_dir`, ...) answer `false` when the underlying
//! status call fails, as `std::path::Path::exists` does. Value queries
//! (`size`, timestamps, `abspath`) return a [`PathError`] instead.

use crate::archive::EntryKind;
use crate::error::{PathError, Result};
use crate::path::{plain, ArchivePath, Path, PlainPath};
use std::fs;
use std::time::SystemTime;

/// Uniform metadata interface
pub trait PathMetadata {
    fn exists(&self) -> bool;

    /// Like `exists`, but a dangling symbolic link counts as existing
    fn lexists(&self) -> bool;

    fn is_dir(&self) -> bool;

    fn is_file(&self) -> bool;

    fn is_link(&self) -> bool;

    fn is_mount(&self) -> bool;

    /// Size in bytes of a file
    fn size(&self) -> Result<u64>;

    /// Last access time
    fn atime(&self) -> Result<SystemTime>;

    /// Status-change time (creation time where the platform has no ctime)
    fn ctime(&self) -> Result<SystemTime>;

    /// Last modification time
    fn mtime(&self) -> Result<SystemTime>;

    /// Absolute form, resolved against the current directory
    fn abspath(&self) -> Result<Path>;
}

impl PlainPath {
    fn metadata(&self) -> Result<fs::Metadata> {
        fs::metadata(self.as_std_path()).map_err(|e| PathError::from_io(e, self.as_str()))
    }
}

impl PathMetadata for PlainPath {
    fn exists(&self) -> bool {
        fs::metadata(self.as_std_path()).is_ok()
    }

    fn lexists(&self) -> bool {
        fs::symlink_metadata(self.as_std_path()).is_ok()
    }

    fn is_dir(&self) -> bool {
        self.as_std_path().is_dir()
    }

    fn is_file(&self) -> bool {
        self.as_std_path().is_file()
    }

    fn is_link(&self) -> bool {
        fs::symlink_metadata(self.as_std_path())
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    #[cfg(unix)]
    fn is_mount(&self) -> bool {
        use std::os::unix::fs::MetadataExt;

        let own = match fs::symlink_metadata(self.as_std_path()) {
            Ok(meta) if !meta.file_type().is_symlink() => meta,
            _ => return false,
        };
        let parent = plain::join(self.as_str(), "..");
        match fs::metadata(&parent) {
            // Different device than the parent, or the root (its own parent)
            Ok(up) => own.dev() != up.dev() || own.ino() == up.ino(),
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    fn is_mount(&self) -> bool {
        match self.abspath() {
            Ok(abs) => std::path::Path::new(abs.as_str()).parent().is_none(),
            Err(_) => false,
        }
    }

    fn size(&self) -> Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn atime(&self) -> Result<SystemTime> {
        Ok(self.metadata()?.accessed()?)
    }

    #[cfg(unix)]
    fn ctime(&self) -> Result<SystemTime> {
        use std::os::unix::fs::MetadataExt;
        use std::time::{Duration, UNIX_EPOCH};

        let meta = self.metadata()?;
        let secs = u64::try_from(meta.ctime())
            .map_err(|_| PathError::NotSupported(format!("pre-epoch ctime: {}", self)))?;
        Ok(UNIX_EPOCH + Duration::new(secs, meta.ctime_nsec() as u32))
    }

    #[cfg(not(unix))]
    fn ctime(&self) -> Result<SystemTime> {
        Ok(self.metadata()?.created()?)
    }

    fn mtime(&self) -> Result<SystemTime> {
        Ok(self.metadata()?.modified()?)
    }

    fn abspath(&self) -> Result<Path> {
        if self.is_abs() {
            return Ok(Path::new(plain::normpath(self.as_str())));
        }
        let cwd = crate::workdir::current_dir()?;
        Ok(Path::new(plain::normpath(&plain::join(
            cwd.as_str(),
            self.as_str(),
        ))))
    }
}

impl ArchivePath {
    /// Run `f` against the entry's classification in a fresh index
    fn with_entry<T>(&self, f: impl FnOnce(Option<EntryKind<'_>>) -> Result<T>) -> Result<T> {
        let index = self.index()?;
        f(index.lookup(self.entry_name()))
    }

    fn probe_entry(&self, f: impl FnOnce(EntryKind<'_>) -> bool) -> bool {
        match self.with_entry(|kind| Ok(kind.map(f).unwrap_or(false))) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::debug!(path = %self, error = %e, "archive index unavailable; answering false");
                false
            }
        }
    }

    fn entry_time(&self) -> Result<SystemTime> {
        self.with_entry(|kind| match kind {
            Some(EntryKind::File(info)) | Some(EntryKind::Dir(Some(info))) => info
                .modified
                .ok_or_else(|| PathError::NotSupported(format!("no timestamp stored: {}", self))),
            _ => Err(PathError::PathDoesNotExist(self.to_string())),
        })
    }
}

impl PathMetadata for ArchivePath {
    fn exists(&self) -> bool {
        self.probe_entry(|_| true)
    }

    fn lexists(&self) -> bool {
        self.exists()
    }

    fn is_dir(&self) -> bool {
        self.probe_entry(|kind| kind.is_dir())
    }

    fn is_file(&self) -> bool {
        self.probe_entry(|kind| kind.is_file())
    }

    // Archive entries are never links or mount points
    fn is_link(&self) -> bool {
        false
    }

    fn is_mount(&self) -> bool {
        false
    }

    /// Size of a file entry
    ///
    /// Directories (explicit or implied) have no size and report
    /// `PathDoesNotExist`, the same as absent entries.
    fn size(&self) -> Result<u64> {
        self.with_entry(|kind| match kind {
            Some(EntryKind::File(info)) => Ok(info.size),
            _ => Err(PathError::PathDoesNotExist(self.to_string())),
        })
    }

    fn atime(&self) -> Result<SystemTime> {
        if self.is_root() {
            return self.archive_file().atime();
        }
        Err(PathError::NotSupported(format!(
            "zip archives do not record access times: {}",
            self
        )))
    }

    fn ctime(&self) -> Result<SystemTime> {
        if self.is_root() {
            return self.archive_file().ctime();
        }
        self.entry_time()
    }

    fn mtime(&self) -> Result<SystemTime> {
        if self.is_root() {
            return self.archive_file().mtime();
        }
        self.entry_time()
    }

    fn abspath(&self) -> Result<Path> {
        let location = self.archive_file().abspath()?;
        Ok(Path::from_parts(
            location.as_str(),
            self.password(),
            self.entry_name(),
        ))
    }
}

impl Path {
    /// The variant's metadata implementation
    pub fn facade(&self) -> &dyn PathMetadata {
        match self {
            Path::Plain(p) => p,
            Path::Archive(a) => a,
        }
    }
}

impl PathMetadata for Path {
    fn exists(&self) -> bool {
        self.facade().exists()
    }

    fn lexists(&self) -> bool {
        self.facade().lexists()
    }

    fn is_dir(&self) -> bool {
        self.facade().is_dir()
    }

    fn is_file(&self) -> bool {
        self.facade().is_file()
    }

    fn is_link(&self) -> bool {
        self.facade().is_link()
    }

    fn is_mount(&self) -> bool {
        self.facade().is_mount()
    }

    fn size(&self) -> Result<u64> {
        self.facade().size()
    }

    fn atime(&self) -> Result<SystemTime> {
        self.facade().atime()
    }

    fn ctime(&self) -> Result<SystemTime> {
        self.facade().ctime()
    }

    fn mtime(&self) -> Result<SystemTime> {
        self.facade().mtime()
    }

    fn abspath(&self) -> Result<Path> {
        self.facade().abspath()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Collects formatted log lines
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_unreadable_index_is_logged() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(captured.clone())
            .finish();

        let archive = ArchivePath::from_parts("bogus/missing.zip", None, "a.txt");
        tracing::subscriber::with_default(subscriber, || {
            assert!(!archive.exists());
            assert!(!archive.is_file());
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("archive index unavailable"), "{}", logs);
        assert!(logs.contains("bogus/missing.zip"), "{}", logs);
    }

    #[cfg(unix)]
    #[test]
    fn test_exists() {
        assert!(Path::new("/").exists());
        assert!(Path::new("/").lexists());
        assert!(!Path::new("bogus/doesn't/exist").exists());
        assert!(!Path::new("bogus/doesn't/exist").lexists());
    }

    #[cfg(unix)]
    #[test]
    fn test_root_is_mount() {
        assert!(Path::new("/").is_mount());
        assert!(!Path::new("bogus/doesn't/exist").is_mount());
    }

    #[test]
    fn test_missing_path_errors() {
        let missing = Path::new("bogus/doesn't/exist");
        assert!(matches!(missing.size(), Err(PathError::PathDoesNotExist(_))));
        assert!(matches!(missing.mtime(), Err(PathError::PathDoesNotExist(_))));
    }

    #[test]
    fn test_missing_archive_entry_is_absent() {
        let archive = ArchivePath::from_parts("bogus/missing.zip", None, "a.txt");
        assert!(!archive.exists());
        assert!(!archive.is_dir());
        assert!(!archive.is_file());
        assert!(!archive.is_link());
        assert!(matches!(archive.atime(), Err(PathError::NotSupported(_))));
    }
}
