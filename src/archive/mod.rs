mod end_record;
mod probe;
mod reader;

pub use end_record::{EndRecord, END_RECORD_SIGNATURE, END_RECORD_SIZE};
pub use probe::is_zip_archive;
pub use reader::{normalize_entry_name, ArchiveIndex, EntryInfo, EntryKind};
