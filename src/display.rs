use std::collections::BTreeMap;
use std::fmt::Write;

use crate::processor::{ArchiveReport, ExtractedEntry};

/// Render a hexdump of the start of `data`, 16 bytes per line
pub fn hexdump_lines(data: &[u8], max_lines: usize, indent: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for (row, chunk) in data.chunks(16).take(max_lines).enumerate() {
        let mut line = format!("{}  {:08x}  ", indent, row * 16);
        for i in 0..16 {
            match chunk.get(i) {
                Some(b) => {
                    let _ = write!(line, "{:02x} ", b);
                }
                None => line.push_str("   "),
            }
            if i == 7 {
                line.push(' ');
            }
        }

        line.push_str(" |");
        line.extend(chunk.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
        line.push('|');
        lines.push(line);
    }

    if data.len() > max_lines * 16 {
        lines.push(format!(
            "{}  ... ({} more bytes)",
            indent,
            data.len() - max_lines * 16
        ));
    }

    lines
}

pub fn print_hexdump_preview(data: &[u8], max_lines: usize, indent: &str) {
    for line in hexdump_lines(data, max_lines, indent) {
        println!("{}", line);
    }
}

/// One listing line per extracted image: name, offset and size
pub fn print_entry(entry: &ExtractedEntry) {
    let mut line = format!("{} 0x{:x} {}", entry.name, entry.offset, entry.size);
    if let Some(address) = entry.flash_address {
        let _ = write!(line, " -> 0x{:08x}", address);
    }
    if entry.oversized {
        line.push_str(" [oversized]");
    }
    println!("{}", line);
}

/// Count and total bytes per subsystem tag, in tag order
pub fn subsystem_totals(entries: &[ExtractedEntry]) -> BTreeMap<&str, (usize, u64)> {
    let mut totals: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
    for entry in entries {
        let slot = totals.entry(entry.subsystem.as_str()).or_default();
        slot.0 += 1;
        slot.1 += entry.size as u64;
    }
    totals
}

pub fn summarize_report(report: &ArchiveReport) {
    println!();
    println!("=== {} (revision {:?}) ===", report.archive, report.revision);
    for (subsystem, (count, bytes)) in subsystem_totals(&report.entries) {
        println!("{:<20} {:>3} image(s) {:>10} bytes", subsystem, count, bytes);
    }
}

pub fn manifest_json(report: &ArchiveReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
