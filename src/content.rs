//! Read-only access to file contents and directory listings

use crate::archive::EntryKind;
use crate::error::{PathError, Result};
use crate::path::{ArchivePath, Path, PlainPath};
use crate::workdir::path_buf_to_string;
use std::fs;

impl Path {
    /// Read the whole file (or archive entry)
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Path::Plain(p) => {
                fs::read(p.as_std_path()).map_err(|e| PathError::from_io(e, p.as_str()))
            }
            Path::Archive(a) => a.index()?.read_file(a.entry_name()),
        }
    }

    /// Read the whole file (or archive entry) as UTF-8
    pub fn read_to_string(&self) -> Result<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|e| {
            PathError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// Immediate children, sorted by name
    ///
    /// Children of a plain directory are resolved like any other joined path,
    /// so an archive file in the listing comes back as an archive root.
    pub fn list_dir(&self) -> Result<Vec<Path>> {
        match self {
            Path::Plain(p) => list_plain(self, p),
            Path::Archive(a) => list_archive(a),
        }
    }
}

fn list_plain(path: &Path, plain: &PlainPath) -> Result<Vec<Path>> {
    let entries = fs::read_dir(plain.as_std_path()).map_err(|e| PathError::from_io(e, plain.as_str()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        names.push(path_buf_to_string(entry.file_name().into())?);
    }
    names.sort();

    Ok(names.into_iter().map(|name| path.join(name)).collect())
}

fn list_archive(archive: &ArchivePath) -> Result<Vec<Path>> {
    let index = archive.index()?;
    match index.lookup(archive.entry_name()) {
        Some(EntryKind::Dir(_)) => Ok(index
            .children(archive.entry_name())
            .into_iter()
            .map(|child| Path::Archive(archive.join(&child)))
            .collect()),
        Some(EntryKind::File(_)) => Err(PathError::NotSupported(format!(
            "not a directory: {}",
            archive
        ))),
        None => Err(PathError::PathDoesNotExist(archive.to_string())),
    }
}
