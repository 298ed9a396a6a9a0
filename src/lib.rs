//! Compress a file, then seal it under a password-derived key.
//!
//! Sealing is `encrypt(compress(plaintext), derive_key(password))`; opening
//! runs the same stages in reverse. The sealed file holds the blob only.

mod compress;
mod crypto;
mod error;
mod format;
mod naming;
mod storage;

pub use crate::compress::CompressionLevel;
pub use crate::crypto::{DerivedKey, derive_key};
pub use crate::error::{Error, Result};
pub use crate::format::{BlobInfo, CipherBlob};
pub use crate::naming::{SUFFIX, restored_name, sealed_name};
pub use crate::storage::Storage;

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Sizes of each stage, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeStats {
    /// Plaintext file size.
    pub plain: usize,
    /// Compressed payload size, before encryption or after decryption.
    pub compressed: usize,
    /// Sealed blob size.
    pub sealed: usize,
}

impl SizeStats {
    /// Fraction of the plaintext saved by compression, in percent.
    ///
    /// Negative when compression grew the data; zero for an empty file.
    pub fn saved_percent(&self) -> f64 {
        if self.plain == 0 {
            return 0.0;
        }
        (1.0 - self.compressed as f64 / self.plain as f64) * 100.0
    }
}

/// Result of a file operation: where the output went and how big it was.
#[derive(Debug, Clone)]
pub struct Report {
    path: PathBuf,
    stats: SizeStats,
}

impl Report {
    /// The file that was written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sizes of each stage of the operation.
    pub fn stats(&self) -> SizeStats {
        self.stats
    }
}

/// Sequences compression and the authenticated cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    level: CompressionLevel,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: CompressionLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> CompressionLevel {
        self.level
    }

    /// Compress and encrypt a buffer into a serialized blob.
    pub fn seal(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
        let (blob, _) = self.seal_counted(plaintext, password)?;
        Ok(blob)
    }

    /// Decrypt and decompress a serialized blob.
    ///
    /// Every malformed or tampered blob, and every wrong password, is
    /// [`Error::Authentication`]. No plaintext is returned unless the tag
    /// verifies.
    pub fn open(&self, sealed: &[u8], password: &str) -> Result<Zeroizing<Vec<u8>>> {
        let (plaintext, _) = self.open_counted(sealed, password)?;
        Ok(plaintext)
    }

    /// Seal `input` into `output_dir/<name>.compressed`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `input` is not an existing regular file; in that
    /// case nothing is created. I/O errors pass through unchanged.
    pub fn encrypt_file(&self, input: &Path, output_dir: &Path, password: &str) -> Result<Report> {
        let source = Storage::new(input.to_path_buf());
        if !source.exists() {
            return Err(Error::NotFound(input.to_path_buf()));
        }
        let name = naming::sealed_name(input)?;

        fs::create_dir_all(output_dir)?;

        let plaintext = Zeroizing::new(source.load()?);
        let (blob, compressed) = self.seal_counted(&plaintext, password)?;

        let target = Storage::new(output_dir.join(name));
        target.save(&blob)?;

        let stats = SizeStats {
            plain: plaintext.len(),
            compressed,
            sealed: blob.len(),
        };
        info!(
            input = %input.display(),
            output = %target.path().display(),
            plain = stats.plain,
            compressed = stats.compressed,
            sealed = stats.sealed,
            "file sealed"
        );

        Ok(Report {
            path: target.path().to_path_buf(),
            stats,
        })
    }

    /// Open a sealed `input` into `output_dir`, named with the first
    /// `.compressed` removed.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for a missing input, [`Error::Authentication`] for
    /// a wrong password or damaged file, [`Error::CorruptData`] if the
    /// decrypted payload does not decompress, [`Error::OverwritesInput`] if the
    /// output would land on `input` itself. Nothing is written on failure.
    pub fn decrypt_file(&self, input: &Path, output_dir: &Path, password: &str) -> Result<Report> {
        let source = Storage::new(input.to_path_buf());
        if !source.exists() {
            return Err(Error::NotFound(input.to_path_buf()));
        }
        let name = naming::restored_name(input)?;
        let target = Storage::new(output_dir.join(name));
        if is_same_file(input, target.path())? {
            return Err(Error::OverwritesInput(input.to_path_buf()));
        }

        fs::create_dir_all(output_dir)?;

        let sealed = source.load()?;
        let (plaintext, compressed) = self
            .open_counted(&sealed, password)
            .inspect_err(|e| warn!(input = %input.display(), error = %e, "cannot open file"))?;

        target.save(&plaintext)?;

        let stats = SizeStats {
            plain: plaintext.len(),
            compressed,
            sealed: sealed.len(),
        };
        info!(
            input = %input.display(),
            output = %target.path().display(),
            sealed = stats.sealed,
            compressed = stats.compressed,
            plain = stats.plain,
            "file opened"
        );

        Ok(Report {
            path: target.path().to_path_buf(),
            stats,
        })
    }

    /// Returns the blob and the compressed payload size.
    fn seal_counted(&self, plaintext: &[u8], password: &str) -> Result<(Vec<u8>, usize)> {
        let compressed = Zeroizing::new(compress::compress(plaintext, self.level)?);
        debug!(
            plain = plaintext.len(),
            compressed = compressed.len(),
            level = self.level.get(),
            "compressed payload"
        );

        let key = crypto::derive_key(password);

        let created = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        let aad = format::associated_data(format::CURRENT_VERSION, created);
        let (ciphertext, nonce) = crypto::encrypt(&key, &aad, &compressed)?;

        let blob = format::serialize(&CipherBlob::new(created, nonce, ciphertext))?;
        debug!(sealed = blob.len(), "encrypted payload");

        Ok((blob, compressed.len()))
    }

    /// Returns the plaintext and the compressed payload size.
    fn open_counted(&self, sealed: &[u8], password: &str) -> Result<(Zeroizing<Vec<u8>>, usize)> {
        let blob = format::parse(sealed).map_err(|e| {
            debug!(error = %e, "malformed blob");
            Error::Authentication
        })?;

        let key = crypto::derive_key(password);

        let compressed =
            crypto::decrypt(&key, blob.nonce(), &blob.associated_data(), blob.ciphertext())?;
        debug!(compressed = compressed.len(), "decrypted payload");

        let plaintext = Zeroizing::new(compress::decompress(&compressed)?);
        debug!(plain = plaintext.len(), "decompressed payload");

        Ok((plaintext, compressed.len()))
    }
}

/// `true` if `candidate` exists and resolves to the same file as `input`.
fn is_same_file(input: &Path, candidate: &Path) -> Result<bool> {
    if !candidate.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(input)? == fs::canonicalize(candidate)?)
}

/// Seal a file with the default compression level.
pub fn encrypt_file(input: &Path, output_dir: &Path, password: &str) -> Result<Report> {
    Pipeline::new().encrypt_file(input, output_dir, password)
}

/// Open a sealed file.
pub fn decrypt_file(input: &Path, output_dir: &Path, password: &str) -> Result<Report> {
    Pipeline::new().decrypt_file(input, output_dir, password)
}

/// Parse a sealed file without the password.
pub fn inspect_file(input: &Path) -> Result<BlobInfo> {
    let data = Storage::new(input.to_path_buf()).load()?;
    Ok(format::parse(&data)?.info())
}
