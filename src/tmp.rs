//! Scratch directories

use crate::error::Result;
use crate::path::Path;
use crate::workdir::path_buf_to_string;
use std::fmt;
use std::ops::Deref;
use tempfile::TempDir;

/// A temporary directory, removed with everything in it when dropped
pub struct TmpPath {
    dir: TempDir,
    path: Path,
}

/// Create a fresh temporary directory
pub fn tmp() -> Result<TmpPath> {
    let dir = tempfile::tempdir()?;
    // Resolve symlinked temp roots (macOS /var -> /private/var) so the path
    // compares equal to what the working directory reports
    let real = dir.path().canonicalize()?;
    let path = Path::new(path_buf_to_string(real)?);
    tracing::debug!(path = %path, "created temporary directory");
    Ok(TmpPath { dir, path })
}

impl TmpPath {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now, reporting any failure
    pub fn close(self) -> Result<()> {
        self.dir.close()?;
        Ok(())
    }
}

impl Deref for TmpPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for TmpPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TmpPath('{}')", self.path)
    }
}
