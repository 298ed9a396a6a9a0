//! Human-readable summaries printed by the CLI and the menu.

use sealpack::{BlobInfo, Report};
use std::io::{self, Write};

pub fn write_sealed(out: &mut impl Write, report: &Report) -> io::Result<()> {
    let stats = report.stats();
    writeln!(out, "Original size:   {} bytes", group_digits(stats.plain))?;
    writeln!(
        out,
        "Compressed size: {} bytes ({:.1}% saved)",
        group_digits(stats.compressed),
        stats.saved_percent()
    )?;
    writeln!(out, "Encrypted size:  {} bytes", group_digits(stats.sealed))?;
    writeln!(out, "Compressed and encrypted: {}", report.path().display())
}

pub fn write_opened(out: &mut impl Write, report: &Report) -> io::Result<()> {
    let stats = report.stats();
    writeln!(out, "Encrypted size:    {} bytes", group_digits(stats.sealed))?;
    writeln!(out, "Decrypted size:    {} bytes", group_digits(stats.compressed))?;
    writeln!(out, "Decompressed size: {} bytes", group_digits(stats.plain))?;
    writeln!(out, "Decrypted and decompressed: {}", report.path().display())
}

pub fn write_info(out: &mut impl Write, info: &BlobInfo) -> io::Result<()> {
    writeln!(out, "format version: {}", info.version)?;
    writeln!(
        out,
        "created:        {}",
        info.created.as_deref().unwrap_or("unknown")
    )?;
    writeln!(out, "nonce:          {}", info.nonce)?;
    writeln!(out, "payload:        {} bytes", group_digits(info.payload_len))
}

/// `1234567` -> `1,234,567`
fn group_digits(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
