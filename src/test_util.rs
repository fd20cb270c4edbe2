use crate::directory_entry::{ENTRY_SIZE, TAG_LEN};
use crate::header::HEADER_SIZE;

pub fn build_header(magic: &[u8; 6], revision_id: &[u8; 3]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(HEADER_SIZE);
    buffer.extend_from_slice(magic);
    buffer.extend_from_slice(revision_id);
    buffer.resize(HEADER_SIZE, 0);
    buffer
}

fn tag_field(tag: &str) -> [u8; TAG_LEN] {
    let mut field = [0u8; TAG_LEN];
    let bytes = tag.as_bytes();
    field[..bytes.len()].copy_from_slice(bytes);
    field
}

pub fn build_entry(subsystem: &str, tag: &str, size: u32) -> Vec<u8> {
    let mut entry = Vec::with_capacity(ENTRY_SIZE);
    entry.extend_from_slice(&tag_field(subsystem));
    entry.extend_from_slice(&tag_field(tag));
    entry.extend_from_slice(&size.to_le_bytes());
    entry
}

/// Header with the canonical magic followed by one entry + payload per image
pub fn build_archive(revision_id: &[u8; 3], images: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut buffer = build_header(b"A5Pack", revision_id);
    for (subsystem, tag, payload) in images {
        buffer.extend_from_slice(&build_entry(subsystem, tag, payload.len() as u32));
        buffer.extend_from_slice(payload);
    }
    buffer
}
