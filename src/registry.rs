use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::directory_entry::DirectoryEntry;
use crate::error::A5Result;

/// Known payload tags: (tag, flash address, max size)
const BUILTIN_CHUNKS: &[(&str, u32, u32)] = &[
    ("bootloader", 0x0000_0000, 0x0001_0000),
    ("firmware", 0x0001_0000, 0x003f_0000),
    ("voice data", 0x0040_0000, 0x0040_0000),
    ("patch", 0x0080_0000, 0x0001_0000),
    ("mcu image", 0x0800_0000, 0x0002_0000),
];

/// Where a known payload is flashed and how large it may be
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSpec {
    pub tag: String,
    pub address: u32,
    pub max_size: u32,
}

/// Result of comparing an entry against the registry. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryCheck<'r> {
    Unknown,
    Fits(&'r ChunkSpec),
    Oversized(&'r ChunkSpec),
}

#[derive(Debug, Clone)]
pub struct ChunkRegistry {
    chunks: HashMap<String, ChunkSpec>,
}

impl ChunkRegistry {
    pub fn builtin() -> Self {
        Self::from_specs(
            BUILTIN_CHUNKS
                .iter()
                .map(|&(tag, address, max_size)| ChunkSpec {
                    tag: tag.to_string(),
                    address,
                    max_size,
                })
                .collect(),
        )
    }

    /// Later specs with a repeated tag replace earlier ones
    pub fn from_specs(specs: Vec<ChunkSpec>) -> Self {
        let chunks = specs
            .into_iter()
            .map(|spec| (spec.tag.clone(), spec))
            .collect();
        ChunkRegistry { chunks }
    }

    /// Parse a JSON array of `{ "tag", "address", "max_size" }` objects
    pub fn from_json(json: &str) -> A5Result<Self> {
        let specs: Vec<ChunkSpec> = serde_json::from_str(json)?;
        Ok(Self::from_specs(specs))
    }

    pub fn load(path: &Path) -> A5Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn lookup(&self, tag: &str) -> Option<&ChunkSpec> {
        self.chunks.get(tag)
    }

    pub fn check(&self, entry: &DirectoryEntry) -> RegistryCheck<'_> {
        match self.lookup(&entry.payload_tag) {
            None => RegistryCheck::Unknown,
            Some(spec) if entry.payload_size > spec.max_size => RegistryCheck::Oversized(spec),
            Some(spec) => RegistryCheck::Fits(spec),
        }
    }
}

impl Default for ChunkRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
