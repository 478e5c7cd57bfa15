use crate::error::{PathError, Result};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use zip::result::ZipError;
use zip::ZipArchive;

/// Normalize an entry name: forward slashes, no leading or trailing separators
pub fn normalize_entry_name(name: &str) -> String {
    name.replace('\\', "/").trim_matches('/').to_string()
}

/// Central directory information for one stored entry
#[derive(Debug, Clone)]
pub struct EntryInfo {
    /// Name exactly as stored in the archive
    pub raw_name: String,
    pub size: u64,
    pub compressed_size: u64,
    pub is_dir: bool,
    pub encrypted: bool,
    pub modified: Option<SystemTime>,
}

/// Classification of a name against the entry index
#[derive(Debug, Clone, Copy)]
pub enum EntryKind<'a> {
    /// Exact match on a stored file entry
    File(&'a EntryInfo),
    /// Directory; `None` when implied by other entries (or the archive root)
    Dir(Option<&'a EntryInfo>),
}

impl EntryKind<'_> {
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Dir(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File(_))
    }
}

/// Snapshot of an archive's entry index
///
/// The archive file is opened, its central directory read, and the file
/// closed again inside [`ArchiveIndex::load`]. Nothing is cached between
/// loads, so every query sees the archive as it currently is on disk.
pub struct ArchiveIndex {
    location: String,
    password: Option<String>,
    entries: HashMap<String, EntryInfo>,
    entry_list: Vec<String>,
}

impl ArchiveIndex {
    /// Read the entry index of the archive at `location`
    pub fn load(location: &str, password: Option<&str>) -> Result<Self> {
        let mut archive = open_archive(location)?;

        let mut entries: HashMap<String, EntryInfo> = HashMap::with_capacity(archive.len());
        let mut entry_list = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i)?;
            let key = normalize_entry_name(entry.name());
            if key.is_empty() {
                continue;
            }

            // Older zip releases return the timestamp bare, newer ones as an Option
            let modified: Option<zip::DateTime> = entry.last_modified().into();
            let info = EntryInfo {
                raw_name: entry.name().to_string(),
                size: entry.size(),
                compressed_size: entry.compressed_size(),
                is_dir: entry.is_dir(),
                encrypted: entry.encrypted(),
                modified: modified.and_then(dos_time_to_system),
            };

            // A file entry wins over a directory entry of the same name
            match entries.get(&key) {
                Some(existing) if !existing.is_dir => continue,
                Some(_) => {}
                None => entry_list.push(key.clone()),
            }
            entries.insert(key, info);
        }

        tracing::debug!(archive = location, entries = entries.len(), "loaded archive index");

        Ok(Self {
            location: location.to_string(),
            password: password.map(str::to_string),
            entries,
            entry_list,
        })
    }

    /// Location of the archive this index was read from
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Get number of stored entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// All stored entry names (normalized), in archive order
    pub fn list_entries(&self) -> &[String] {
        &self.entry_list
    }

    /// Get entry information for an exact stored name
    pub fn get_entry(&self, name: &str) -> Option<&EntryInfo> {
        self.entries.get(&normalize_entry_name(name))
    }

    /// Classify `name`, treating proper prefixes of stored entries as directories
    pub fn lookup(&self, name: &str) -> Option<EntryKind<'_>> {
        let key = normalize_entry_name(name);
        if key.is_empty() {
            return Some(EntryKind::Dir(None));
        }

        if let Some(info) = self.entries.get(&key) {
            return Some(if info.is_dir {
                EntryKind::Dir(Some(info))
            } else {
                EntryKind::File(info)
            });
        }

        let prefix = format!("{}/", key);
        if self.entry_list.iter().any(|stored| stored.starts_with(&prefix)) {
            return Some(EntryKind::Dir(None));
        }

        None
    }

    /// Immediate children of the directory `name`, sorted and deduplicated
    pub fn children(&self, name: &str) -> Vec<String> {
        let key = normalize_entry_name(name);
        let prefix = if key.is_empty() {
            String::new()
        } else {
            format!("{}/", key)
        };

        self.entry_list
            .iter()
            .filter_map(|stored| stored.strip_prefix(prefix.as_str()))
            .filter_map(|rest| rest.split('/').next())
            .filter(|child| !child.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Read and decompress a file entry
    ///
    /// Reopens the archive for the duration of the read.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let display = format!("{}/{}", self.location, normalize_entry_name(name));
        let info = match self.lookup(name) {
            Some(EntryKind::File(info)) => info,
            _ => return Err(PathError::PathDoesNotExist(display)),
        };

        if info.encrypted && self.password.is_none() {
            return Err(PathError::InvalidPassword(display));
        }

        let mut archive = open_archive(&self.location)?;
        let mut file = match (&self.password, info.encrypted) {
            (Some(password), true) => archive
                .by_name_decrypt(&info.raw_name, password.as_bytes())
                .map_err(|e| match e {
                    ZipError::InvalidPassword => PathError::InvalidPassword(display.clone()),
                    other => PathError::Zip(other),
                })?,
            _ => archive.by_name(&info.raw_name)?,
        };

        let mut data = Vec::with_capacity(info.size as usize);
        file.read_to_end(&mut data)
            .map_err(|e| PathError::from_io(e, &display))?;
        Ok(data)
    }
}

fn open_archive(location: &str) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(location).map_err(|e| PathError::from_io(e, location))?;
    ZipArchive::new(BufReader::new(file)).map_err(|e| match e {
        ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_) => {
            PathError::NotAnArchive(location.to_string())
        }
        ZipError::Io(io) => PathError::from_io(io, location),
        other => PathError::Zip(other),
    })
}

/// DOS timestamps carry no zone; they are read as UTC
fn dos_time_to_system(dt: zip::DateTime) -> Option<SystemTime> {
    let naive = NaiveDate::from_ymd_opt(dt.year() as i32, dt.month() as u32, dt.day() as u32)?
        .and_hms_opt(dt.hour() as u32, dt.minute() as u32, dt.second() as u32)?;
    let secs = u64::try_from(naive.and_utc().timestamp()).ok()?;
    Some(UNIX_EPOCH + Duration::from_secs(secs))
}
