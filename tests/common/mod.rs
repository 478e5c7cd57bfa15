//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use zip::unstable::write::FileOptionsExt;
use zip::write::SimpleFileOptions;

/// Route library tracing to the test harness; `RUST_LOG=pth_rs=trace` to see it
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A scratch directory laid out like the project's `tests/` folder:
///
/// ```text
/// <root>/b.txt           "B"
/// <root>/test.zip        a.txt ("A"), 1/nested.txt, 1/2/deep.txt, empty/
/// ```
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), b"B").unwrap();
        write_archive(&dir.path().join("test.zip"));
        Self { dir }
    }

    /// Canonical root directory as a string
    pub fn root(&self) -> String {
        self.dir
            .path()
            .canonicalize()
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    pub fn archive(&self) -> String {
        join(&self.root(), "test.zip")
    }
}

pub fn write_archive(path: &std::path::Path) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();

    zip.start_file("a.txt", options).unwrap();
    zip.write_all(b"A").unwrap();
    // No explicit entry for "1/"
    zip.start_file("1/nested.txt", options).unwrap();
    zip.write_all(b"nested").unwrap();
    zip.start_file("1/2/deep.txt", options).unwrap();
    zip.write_all(b"deep").unwrap();
    zip.add_directory("empty/", options).unwrap();

    zip.finish().unwrap();
}

/// Write an archive whose single entry is encrypted with `password`
pub fn write_encrypted_archive(path: &std::path::Path, password: &str) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default().with_deprecated_encryption(password.as_bytes());

    zip.start_file("secret.txt", options).unwrap();
    zip.write_all(b"classified").unwrap();

    zip.finish().unwrap();
}

pub fn join(base: &str, segment: &str) -> String {
    std::path::Path::new(base)
        .join(segment)
        .to_str()
        .unwrap()
        .to_string()
}
