mod directory_entry;
mod display;
mod error;
mod header;
mod parser;
mod processor;
mod registry;
#[cfg(test)]
mod test_util;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, Level};

use display::{manifest_json, summarize_report};
use header::MagicCheck;
use processor::{process_archive, UnpackOptions, DEFAULT_MAX_ENTRIES};
use registry::ChunkRegistry;

#[derive(Debug, Parser)]
#[command(
    name = "a5unpack",
    version,
    about = "List and extract the images bundled in an A5Pack firmware container"
)]
struct Args {
    /// A5Pack archive
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Write every image to its own file
    #[arg(short, long)]
    unpack: bool,

    /// Destination directory for unpacked images
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    dest: PathBuf,

    /// Header validation: strict requires the "A5Pack" magic, legacy accepts anything
    #[arg(long, value_enum, default_value_t = MagicCheck::Strict)]
    magic: MagicCheck,

    /// Give up after this many entries
    #[arg(long, default_value_t = DEFAULT_MAX_ENTRIES)]
    max_entries: usize,

    /// JSON file replacing the built-in chunk registry
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// Hexdump lines to show per image
    #[arg(long, value_name = "LINES", default_value_t = 0)]
    preview: usize,

    /// Print a JSON manifest instead of the listing
    #[arg(long)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(args.verbose))
        .with_writer(std::io::stderr)
        .init();

    let registry = match &args.registry {
        Some(path) => ChunkRegistry::load(path)
            .with_context(|| format!("loading registry {}", path.display()))?,
        None => ChunkRegistry::builtin(),
    };
    debug!("{} known chunk tags", registry.len());

    let buffer =
        fs::read(&args.input).with_context(|| format!("opening {}", args.input.display()))?;

    let archive_name = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("archive");

    let options = UnpackOptions {
        magic_check: args.magic,
        unpack: args.unpack,
        dest: args.dest.clone(),
        max_entries: args.max_entries,
        preview_lines: args.preview,
        quiet: args.json,
    };

    let report = process_archive(&buffer, archive_name, &options, &registry)
        .with_context(|| format!("processing {}", args.input.display()))?;

    if args.json {
        println!("{}", manifest_json(&report)?);
    } else {
        summarize_report(&report);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{read_header, HEADER_SIZE};
    use crate::parser::ChunkWalker;
    use crate::test_util::build_archive;

    #[test]
    fn test_example_archive_end_to_end() {
        let payload = [0x5au8; 100];
        let buffer = build_archive(b"V01", &[("A5 code", "firmware", &payload[..])]);
        assert_eq!(buffer.len(), HEADER_SIZE + 44 + 100);

        let header = read_header(&buffer, MagicCheck::Strict).unwrap();
        let mut walker = ChunkWalker::new(&buffer);
        let entry = walker.next().unwrap();
        assert_eq!((entry.payload_offset, entry.payload_size), (135, 100));
        assert_eq!(entry.payload(&buffer).unwrap(), &payload);
        assert!(walker.next().is_none());

        let dir = tempfile::tempdir().unwrap();
        let options = UnpackOptions {
            unpack: true,
            dest: dir.path().to_path_buf(),
            quiet: true,
            ..UnpackOptions::default()
        };
        let report =
            process_archive(&buffer, "fw.bin", &options, &ChunkRegistry::builtin()).unwrap();
        assert_eq!(report.revision, header.revision);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_cli_args() {
        let args = Args::try_parse_from([
            "a5unpack", "fw.bin", "-u", "-d", "out", "--magic", "legacy", "-vv",
        ])
        .unwrap();
        assert!(args.unpack);
        assert_eq!(args.dest, PathBuf::from("out"));
        assert_eq!(args.magic, MagicCheck::Legacy);
        assert_eq!(args.max_entries, DEFAULT_MAX_ENTRIES);
        assert_eq!(log_level(args.verbose), Level::TRACE);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Args::try_parse_from(["a5unpack"]).is_err());
    }
}
