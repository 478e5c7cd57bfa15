//! pth-rs: one path type for files on disk and entries inside zip archives
//!
//! A [`Path`] is built from a string. If some prefix of that string is a real
//! zip archive, the value becomes [`Path::Archive`], remembering where the
//! archive file ends and the entry name begins; otherwise it is a
//! [`Path::Plain`] filesystem path. Joining, `basename`/`dirname`, and the
//! [`PathMetadata`] queries work the same way on both.
//!
//! # Example
//!
//! ```no_run
//! use pth_rs::{Path, PathMetadata};
//!
//! let entry = Path::new("tests/test.zip") / "a.txt";
//! assert!(entry.is_archive());
//! assert_eq!(entry.size()?, 1);
//! assert_eq!(entry.read_bytes()?, b"A");
//!
//! // Scoped working-directory change, restored when the guard drops
//! let scratch = pth_rs::tmp()?;
//! {
//!     let _cwd = scratch.cd().scope()?;
//!     assert!(Path::new(".").is_dir());
//! }
//! # Ok::<(), pth_rs::PathError>(())
//! ```

#![deny(unsafe_code)]

// Core modules
pub mod archive;
mod content;
pub mod error;
mod expand;
pub mod metadata;
pub mod path;
pub mod tmp;
pub mod workdir;

// Re-export commonly used types
pub use archive::{is_zip_archive, ArchiveIndex, EntryInfo, EntryKind};
pub use error::{PathError, Result};
pub use metadata::PathMetadata;
pub use path::{ArchivePath, Path, PlainPath, SEP};
pub use tmp::{tmp, TmpPath};
pub use workdir::{current_dir, WorkingDir, WorkingDirGuard};
