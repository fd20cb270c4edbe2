use crate::error::A5Result;
use crate::header::fixed_str;
use crate::parser::extract_payload;

pub const TAG_LEN: usize = 20;

/// 20 bytes subsystem tag + 20 bytes payload tag + 4 bytes LE size
pub const ENTRY_SIZE: usize = TAG_LEN * 2 + 4;

/// Represents a decoded directory entry from an A5Pack archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Where the entry itself starts in the archive
    pub entry_offset: usize,
    pub subsystem_tag: String,
    pub payload_tag: String,
    pub payload_offset: usize,
    pub payload_size: u32,
}

impl DirectoryEntry {
    /// Decode the 44 raw entry bytes found at `entry_offset`
    pub fn decode(raw: &[u8; ENTRY_SIZE], entry_offset: usize) -> Self {
        let size_bytes = [raw[40], raw[41], raw[42], raw[43]];

        DirectoryEntry {
            entry_offset,
            subsystem_tag: fixed_str(&raw[..TAG_LEN]),
            payload_tag: fixed_str(&raw[TAG_LEN..TAG_LEN * 2]),
            payload_offset: entry_offset + ENTRY_SIZE,
            payload_size: u32::from_le_bytes(size_bytes),
        }
    }

    /// Payload tag with spaces and path separators replaced, usable as a file name
    pub fn sanitized_tag(&self) -> String {
        sanitize(&self.payload_tag)
    }

    pub fn payload<'a>(&self, archive: &'a [u8]) -> A5Result<&'a [u8]> {
        extract_payload(archive, self.payload_offset, self.payload_size as usize)
    }
}

pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect()
}
