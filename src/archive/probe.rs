use crate::archive::end_record::EndRecord;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use zip::ZipArchive;

/// Read-only check whether `path` names a readable zip archive
///
/// Only regular files are considered, and the decision is made from the
/// archive's contents, never from the file name. A file passes when it has an
/// end record and its central directory opens the same way the entry index
/// opens it. Unreadable files and I/O failures simply probe negative.
pub fn is_zip_archive<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        _ => return false,
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "archive probe: unreadable");
            return false;
        }
    };
    let mut reader = BufReader::new(file);

    // Cheap rejection of ordinary files before the central directory is parsed
    match EndRecord::locate(&mut reader) {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::trace!(path = %path.display(), "archive probe: no end record");
            return false;
        }
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "archive probe: read failed");
            return false;
        }
    }

    match ZipArchive::new(reader) {
        Ok(archive) => {
            tracing::trace!(path = %path.display(), entries = archive.len(), "archive probe: hit");
            true
        }
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "archive probe: rejected");
            false
        }
    }
}
