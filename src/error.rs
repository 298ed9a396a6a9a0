use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the sealing pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The input path does not name an existing regular file.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Tag verification failed; the two causes cannot be told apart.
    #[error("decryption failed: wrong password or corrupted file")]
    Authentication,

    /// The decrypted payload is not a valid compressed stream.
    #[error("corrupted data: {0}")]
    CorruptData(String),

    /// The output name would be empty or the input name is not UTF-8.
    #[error("cannot derive an output name from '{}'", .0.display())]
    InvalidFileName(PathBuf),

    /// Zstd level outside the accepted range.
    #[error("compression level {0} out of range (1-19)")]
    InvalidLevel(i32),

    /// The bytes are not a sealed blob this version understands.
    #[error("invalid sealed file: {0}")]
    Format(String),

    /// The OS could not supply random bytes.
    #[error("OS random generator unavailable")]
    Random,

    /// The cipher refused to encrypt the payload.
    #[error("encryption failed")]
    Encryption,

    /// The output path resolves to the input file itself.
    #[error("output would overwrite the input file '{}'", .0.display())]
    OverwritesInput(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
