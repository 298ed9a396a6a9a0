//! Output file names for sealed and restored files.

use std::ffi::OsString;
use std::path::Path;

use crate::error::{Error, Result};

/// Appended to a file name when it is sealed.
pub const SUFFIX: &str = ".compressed";

/// `report.txt` -> `report.txt.compressed`
pub fn sealed_name(input: &Path) -> Result<OsString> {
    let mut name = input
        .file_name()
        .ok_or_else(|| Error::InvalidFileName(input.to_path_buf()))?
        .to_os_string();
    name.push(SUFFIX);
    Ok(name)
}

/// Removes the first occurrence of [`SUFFIX`] anywhere in the file name.
///
/// This is substring removal, not a trailing-suffix check:
/// `a.compressed.bak` becomes `a.bak`.
pub fn restored_name(input: &Path) -> Result<String> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidFileName(input.to_path_buf()))?;

    let restored = name.replacen(SUFFIX, "", 1);
    if restored.is_empty() {
        return Err(Error::InvalidFileName(input.to_path_buf()));
    }

    Ok(restored)
}
