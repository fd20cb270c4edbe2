use crate::error::{A5PackError, A5Result};

pub const MAGIC: [u8; 6] = *b"A5Pack";

/// 6 bytes magic + 3 bytes revision id + 82 bytes padding
pub const HEADER_SIZE: usize = 91;

/// Whether the header magic is enforced. Older containers carry arbitrary
/// bytes there, so the caller has to opt out explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MagicCheck {
    #[default]
    Strict,
    Legacy,
}

#[derive(Debug, Clone)]
pub struct Header {
    pub magic: [u8; 6],
    pub revision_id: [u8; 3],
    pub revision: String,
}

impl Header {
    pub fn magic_matches(&self) -> bool {
        self.magic == MAGIC
    }
}

/// Decode a fixed-width text field, dropping the trailing nul padding
pub fn fixed_str(field: &[u8]) -> String {
    String::from_utf8_lossy(field)
        .trim_end_matches('\0')
        .to_string()
}

/// Read and validate the archive header
pub fn read_header(buffer: &[u8], check: MagicCheck) -> A5Result<Header> {
    if buffer.len() < HEADER_SIZE {
        return Err(A5PackError::TruncatedInput {
            needed: HEADER_SIZE,
            available: buffer.len(),
        });
    }

    let magic = [
        buffer[0], buffer[1], buffer[2], buffer[3], buffer[4], buffer[5],
    ];
    let revision_id = [buffer[6], buffer[7], buffer[8]];

    if check == MagicCheck::Strict && magic != MAGIC {
        return Err(A5PackError::BadMagic { found: magic });
    }

    Ok(Header {
        magic,
        revision_id,
        revision: fixed_str(&revision_id[1..]),
    })
}
