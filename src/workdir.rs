//! Process working-directory changes
//!
//! The current directory is a single process-wide resource and
//! [`WorkingDir`] is the only writer in this crate. Scopes nest last-in,
//! first-out: each guard restores exactly the directory it captured. They are
//! not safe to use from independent threads at the same time, since an
//! inner change from one thread is visible to every other; serialize such work
//! or avoid scopes for it.

use crate::error::{PathError, Result};
use crate::path::{Path, PlainPath};
use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;

/// Current process directory as a [`Path`]
pub fn current_dir() -> Result<Path> {
    let cwd = std::env::current_dir()?;
    let cwd = path_buf_to_string(cwd)?;
    Ok(Path::new(cwd))
}

pub(crate) fn path_buf_to_string(path: PathBuf) -> Result<String> {
    path.into_os_string()
        .into_string()
        .map_err(|raw| PathError::NotSupported(format!("non UTF-8 path: {:?}", raw)))
}

/// A pending change of the process working directory
#[derive(Clone)]
pub struct WorkingDir {
    target: Path,
}

impl WorkingDir {
    /// Target a directory; strings go through archive boundary detection
    pub fn new(target: impl Into<Path>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Archive paths cannot be the target of a native directory change
    fn plain_target(&self) -> Result<&PlainPath> {
        match &self.target {
            Path::Plain(p) => Ok(p),
            Path::Archive(a) => Err(PathError::NotSupported(format!(
                "cannot change directory into an archive: {}",
                a
            ))),
        }
    }

    fn switch(&self) -> Result<()> {
        let target = self.plain_target()?;
        std::env::set_current_dir(target.as_std_path())
            .map_err(|e| PathError::from_io(e, target.as_str()))?;
        tracing::debug!(dir = %target, "changed working directory");
        Ok(())
    }

    /// Change directory for the rest of the process; nothing is restored
    pub fn enter(&self) -> Result<()> {
        self.switch()
    }

    /// Change directory until the returned guard is dropped
    ///
    /// The previous directory is restored on drop, including during
    /// unwinding and early returns through `?`.
    pub fn scope(&self) -> Result<WorkingDirGuard> {
        self.plain_target()?;
        let previous = std::env::current_dir()?;
        self.switch()?;
        Ok(WorkingDirGuard {
            previous,
            entered: std::env::current_dir().ok(),
            target: self.target.clone(),
        })
    }

    /// Run `f` inside a scope and return its result
    pub fn within<T>(&self, f: impl FnOnce(&Path) -> T) -> Result<T> {
        let guard = self.scope()?;
        Ok(f(&guard))
    }
}

impl fmt::Debug for WorkingDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorkingDir('{}')", self.target)
    }
}

/// Restores the captured working directory when dropped
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct WorkingDirGuard {
    previous: PathBuf,
    entered: Option<PathBuf>,
    target: Path,
}

impl WorkingDirGuard {
    /// Directory that will be restored
    pub fn previous(&self) -> &std::path::Path {
        &self.previous
    }
}

impl Deref for WorkingDirGuard {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.target
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        let current = std::env::current_dir().ok();
        if current.is_some() && current != self.entered {
            tracing::warn!(
                expected = ?self.entered,
                found = ?current,
                "working directory changed inside scope; scopes were not released in order"
            );
        }

        match std::env::set_current_dir(&self.previous) {
            Ok(()) => {
                tracing::debug!(restored = %self.previous.display(), "restored working directory")
            }
            Err(e) => tracing::warn!(
                previous = %self.previous.display(),
                error = %e,
                "failed to restore working directory"
            ),
        }
    }
}
