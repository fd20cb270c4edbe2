use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::directory_entry::{sanitize, DirectoryEntry};
use crate::display::{print_entry, print_hexdump_preview};
use crate::error::{A5PackError, A5Result};
use crate::header::{read_header, MagicCheck};
use crate::parser::ChunkWalker;
use crate::registry::{ChunkRegistry, RegistryCheck};

pub const DEFAULT_MAX_ENTRIES: usize = 1024;

#[derive(Debug, Clone)]
pub struct UnpackOptions {
    pub magic_check: MagicCheck,
    /// Write payloads to `dest`; otherwise only list them
    pub unpack: bool,
    pub dest: PathBuf,
    pub max_entries: usize,
    pub preview_lines: usize,
    /// Suppress the per-entry listing on stdout
    pub quiet: bool,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        UnpackOptions {
            magic_check: MagicCheck::Strict,
            unpack: false,
            dest: PathBuf::from("."),
            max_entries: DEFAULT_MAX_ENTRIES,
            preview_lines: 0,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractedEntry {
    pub name: String,
    pub subsystem: String,
    pub tag: String,
    pub offset: usize,
    pub size: usize,
    pub flash_address: Option<u32>,
    pub oversized: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveReport {
    pub archive: String,
    pub revision: String,
    pub entries: Vec<ExtractedEntry>,
}

/// `{revision}{subsystem}_{offset:08x}_{tag}`, with both tags made filesystem safe
pub fn output_name(revision: &str, entry: &DirectoryEntry) -> String {
    format!(
        "{}{}_{:08x}_{}",
        sanitize(revision),
        sanitize(&entry.subsystem_tag),
        entry.payload_offset,
        entry.sanitized_tag()
    )
}

/// Walk an A5Pack archive, listing every embedded image and optionally
/// writing each one to its own file.
///
/// A payload that runs past the end of the archive aborts the whole walk:
/// the size that would locate the next entry is just as suspect.
pub fn process_archive(
    data: &[u8],
    archive_name: &str,
    options: &UnpackOptions,
    registry: &ChunkRegistry,
) -> A5Result<ArchiveReport> {
    let header = read_header(data, options.magic_check)?;
    if !header.magic_matches() {
        warn!(
            "{}: unexpected magic {:02x?}, continuing in legacy mode",
            archive_name, header.magic
        );
    }
    info!(
        "{}: revision {:?} (id {:02x?}), {} bytes",
        archive_name,
        header.revision,
        header.revision_id,
        data.len()
    );

    if options.unpack {
        fs::create_dir_all(&options.dest)?;
    }

    let mut entries = Vec::new();

    let mut walker = ChunkWalker::new(data);
    for entry in walker.by_ref() {
        if entries.len() >= options.max_entries {
            return Err(A5PackError::TooManyEntries {
                limit: options.max_entries,
            });
        }

        let payload = match entry.payload(data) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    "entry {} ({}/{}) at 0x{:x}: {}",
                    entries.len(),
                    entry.subsystem_tag,
                    entry.payload_tag,
                    entry.entry_offset,
                    e
                );
                return Err(e);
            }
        };

        let (flash_address, oversized) = match registry.check(&entry) {
            RegistryCheck::Unknown => {
                debug!("no registry entry for tag {:?}", entry.payload_tag);
                (None, false)
            }
            RegistryCheck::Fits(spec) => (Some(spec.address), false),
            RegistryCheck::Oversized(spec) => {
                warn!(
                    "{:?} is {} bytes, registry allows at most {}",
                    entry.payload_tag, entry.payload_size, spec.max_size
                );
                (Some(spec.address), true)
            }
        };

        let extracted = ExtractedEntry {
            name: output_name(&header.revision, &entry),
            subsystem: entry.subsystem_tag.clone(),
            tag: entry.payload_tag.clone(),
            offset: entry.payload_offset,
            size: payload.len(),
            flash_address,
            oversized,
        };

        if !options.quiet {
            print_entry(&extracted);
            if options.preview_lines > 0 {
                print_hexdump_preview(payload, options.preview_lines, "");
            }
        }

        if options.unpack {
            let output_path = options.dest.join(&extracted.name);
            let mut out_file = File::create(&output_path)?;
            out_file.write_all(payload)?;
            debug!("wrote {}", output_path.display());
        }

        entries.push(extracted);
    }

    if walker.cursor() < data.len() {
        debug!(
            "{} trailing bytes after the last entry",
            data.len() - walker.cursor()
        );
    }

    if !options.quiet {
        println!("No more files. {} files in total.", entries.len());
    }
    info!("{}: {} images", archive_name, entries.len());

    Ok(ArchiveReport {
        archive: archive_name.to_string(),
        revision: header.revision,
        entries,
    })
}
