use thiserror::Error;

#[derive(Debug, Error)]
pub enum A5PackError {
    #[error("truncated input: need {needed} bytes, have {available}")]
    TruncatedInput { needed: usize, available: usize },

    #[error("bad magic {found:02x?}, not an A5Pack archive")]
    BadMagic { found: [u8; 6] },

    #[error("payload at 0x{offset:x} ({size} bytes) exceeds archive size {available}")]
    PayloadOutOfBounds {
        offset: usize,
        size: usize,
        available: usize,
    },

    #[error("more than {limit} entries, refusing to continue")]
    TooManyEntries { limit: usize },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid registry: {0}")]
    Registry(#[from] serde_json::Error),
}

pub type A5Result<T> = Result<T, A5PackError>;
