#![no_main]

use libfuzzer_sys::fuzz_target;
use pth_rs::archive::EndRecord;
use pth_rs::{is_zip_archive, ArchiveIndex, Path, PathMetadata};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

fuzz_target!(|data: &[u8]| {
    // End record search over raw bytes - should never panic
    let _ = EndRecord::locate(Cursor::new(data));

    // Write fuzz data to temporary file
    let mut temp_file = match NamedTempFile::new() {
        Ok(f) => f,
        Err(_) => return,
    };

    if temp_file.write_all(data).is_err() {
        return;
    }

    if temp_file.flush().is_err() {
        return;
    }

    let location = match temp_file.path().to_str() {
        Some(location) => location.to_string(),
        None => return,
    };

    // Probe and index - should never panic
    let probed = is_zip_archive(&location);
    let index = match ArchiveIndex::load(&location, None) {
        Ok(index) => index,
        Err(_) => return, // Expected for invalid data
    };

    // Try to read each entry - should never panic
    let names: Vec<String> = index.list_entries().to_vec();
    for name in &names {
        let _ = index.lookup(name);
        let _ = index.children(name);
        let _ = index.read_file(name);
    }

    // Metadata through the path facade - should never panic
    if probed {
        let root = Path::new(&location);
        for name in names.iter().take(16) {
            let entry = root.join(name);
            let _ = entry.is_dir() && entry.is_file();
            let _ = entry.size();
            let _ = entry.mtime();
        }
        let _ = root.join("../../../etc/passwd").exists();
    }
});
