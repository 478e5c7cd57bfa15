use crate::error::Result;
use std::io::{Read, Seek, SeekFrom};

/// "PK\x05\x06" signature of the End of Central Directory Record
pub const END_RECORD_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];

/// Fixed part of the end record in bytes (the trailing comment is variable)
pub const END_RECORD_SIZE: usize = 22;

/// Longest archive comment the format can carry
const MAX_COMMENT_LENGTH: usize = u16::MAX as usize;

/// Value stored in 32-bit fields when the real value lives in the zip64 record
const ZIP64_MARKER: u32 = 0xFFFF_FFFF;

/// End of Central Directory Record (EOCD)
///
/// Located at the end of every zip archive, optionally followed by a comment
/// of up to 64 KiB. Finding a well-formed record here is what makes a file a
/// zip archive; the file extension plays no part.
///
/// Structure (22 bytes fixed):
/// - Signature: "PK\x05\x06" (4 bytes)
/// - Disk number: uint16 (2 bytes)
/// - Disk with central directory: uint16 (2 bytes)
/// - Entries on this disk: uint16 (2 bytes)
/// - Total entries: uint16 (2 bytes)
/// - Central Directory Size: uint32 (4 bytes)
/// - Central Directory Offset: uint32 (4 bytes)
/// - Comment Length: uint16 (2 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndRecord {
    pub disk_number: u16,
    pub central_directory_disk: u16,
    pub entries_on_disk: u16,
    pub entry_count: u16,
    pub central_directory_size: u32,
    pub central_directory_offset: u32,
    pub comment_length: u16,
}

impl EndRecord {
    /// Parse the fixed 22-byte record
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < END_RECORD_SIZE || bytes[..4] != END_RECORD_SIGNATURE {
            return None;
        }

        Some(Self {
            disk_number: le_u16(&bytes[4..6]),
            central_directory_disk: le_u16(&bytes[6..8]),
            entries_on_disk: le_u16(&bytes[8..10]),
            entry_count: le_u16(&bytes[10..12]),
            central_directory_size: le_u32(&bytes[12..16]),
            central_directory_offset: le_u32(&bytes[16..20]),
            comment_length: le_u16(&bytes[20..22]),
        })
    }

    /// Search the tail of `reader` for a consistent end record
    ///
    /// Returns `Ok(None)` when the data carries no such record. The fast path
    /// reads only the last 22 bytes (archives without a comment); otherwise
    /// the last 64 KiB + 22 bytes are scanned backwards.
    pub fn locate<R: Read + Seek>(mut reader: R) -> Result<Option<Self>> {
        let file_len = reader.seek(SeekFrom::End(0))?;
        if file_len < END_RECORD_SIZE as u64 {
            return Ok(None);
        }

        // Fast path: no comment
        let mut tail = [0u8; END_RECORD_SIZE];
        reader.seek(SeekFrom::End(-(END_RECORD_SIZE as i64)))?;
        reader.read_exact(&mut tail)?;
        let record_start = file_len - END_RECORD_SIZE as u64;
        if let Some(record) = Self::parse(&tail) {
            if record.comment_length == 0 && record.is_consistent(record_start) {
                return Ok(Some(record));
            }
        }

        // Slow path: trailing comment
        let window = file_len.min((MAX_COMMENT_LENGTH + END_RECORD_SIZE) as u64);
        let window_start = file_len - window;
        reader.seek(SeekFrom::Start(window_start))?;
        let mut buf = vec![0u8; window as usize];
        reader.read_exact(&mut buf)?;

        for pos in (0..=buf.len() - END_RECORD_SIZE).rev() {
            if buf[pos..pos + 4] != END_RECORD_SIGNATURE {
                continue;
            }
            if let Some(record) = Self::parse(&buf[pos..]) {
                let comment_fits =
                    pos + END_RECORD_SIZE + record.comment_length as usize <= buf.len();
                if comment_fits && record.is_consistent(window_start + pos as u64) {
                    return Ok(Some(record));
                }
            }
        }

        Ok(None)
    }

    /// The central directory must end before the record itself starts
    fn is_consistent(&self, record_start: u64) -> bool {
        if self.central_directory_offset == ZIP64_MARKER
            || self.central_directory_size == ZIP64_MARKER
        {
            return true;
        }
        self.entries_on_disk <= self.entry_count
            && self.central_directory_offset as u64 + self.central_directory_size as u64
                <= record_start
    }
}

fn le_u16(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

fn le_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
