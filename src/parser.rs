use std::iter::FusedIterator;

use crate::directory_entry::{DirectoryEntry, ENTRY_SIZE};
use crate::error::{A5PackError, A5Result};
use crate::header::HEADER_SIZE;

/// Walks the chain of directory entries following the archive header.
///
/// Each step decodes one entry at the cursor and moves the cursor past the
/// entry and its declared payload. The declared size is trusted here; payload
/// bounds are only checked by [`extract_payload`]. Running out of room for a
/// whole entry ends the walk.
#[derive(Debug, Clone)]
pub struct ChunkWalker<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> ChunkWalker<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        ChunkWalker {
            buffer,
            cursor: HEADER_SIZE,
        }
    }

    /// Offset at which the next entry is expected
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for ChunkWalker<'_> {
    type Item = DirectoryEntry;

    fn next(&mut self) -> Option<DirectoryEntry> {
        let end = self.cursor.checked_add(ENTRY_SIZE)?;
        let raw: &[u8; ENTRY_SIZE] = self.buffer.get(self.cursor..end)?.try_into().ok()?;

        let entry = DirectoryEntry::decode(raw, self.cursor);
        // saturating: a cursor stuck at usize::MAX fails the check above forever
        self.cursor = entry
            .payload_offset
            .saturating_add(entry.payload_size as usize);

        Some(entry)
    }
}

impl FusedIterator for ChunkWalker<'_> {}

/// Borrow `size` bytes at `offset`, failing if the range leaves the buffer
pub fn extract_payload(buffer: &[u8], offset: usize, size: usize) -> A5Result<&[u8]> {
    let out_of_bounds = || A5PackError::PayloadOutOfBounds {
        offset,
        size,
        available: buffer.len(),
    };

    let end = offset.checked_add(size).ok_or_else(out_of_bounds)?;
    buffer.get(offset..end).ok_or_else(out_of_bounds)
}
