//! Sealed file format.
//!
//! A sealed file carries no magic number; it is recognised by its
//! `.compressed` name. The first byte selects the layout.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::crypto::NONCE_LEN;
use crate::error::{Error, Result};

pub mod v1;

/// Length of version field.
pub const VER_LEN: usize = 1;
/// Latest format version
pub const CURRENT_VERSION: u8 = v1::VERSION_V1;

/// A parsed sealed file: everything needed to decrypt except the key.
#[derive(Debug)]
pub struct CipherBlob {
    version: u8,
    created: u64,
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl CipherBlob {
    /// Creates a blob in the current format version.
    pub fn new(created: u64, nonce: [u8; NONCE_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            version: CURRENT_VERSION,
            created,
            nonce,
            ciphertext,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Creation time in Unix seconds.
    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.created)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// Encrypted payload including the authentication tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Header bytes authenticated alongside the payload.
    pub fn associated_data(&self) -> Vec<u8> {
        associated_data(self.version, self.created)
    }

    /// Summary of the blob that does not require the key.
    pub fn info(&self) -> BlobInfo {
        BlobInfo {
            version: self.version,
            created: self.created_at().map(|t| t.to_rfc3339()),
            nonce: self.nonce.iter().map(|b| format!("{:02x}", b)).collect(),
            payload_len: self.ciphertext.len(),
        }
    }
}

/// Key-free description of a sealed file, as shown by `inspect`.
#[derive(Debug, Serialize)]
pub struct BlobInfo {
    pub version: u8,
    pub created: Option<String>,
    pub nonce: String,
    pub payload_len: usize,
}

/// Builds the associated data for a given version and timestamp.
pub fn associated_data(version: u8, created: u64) -> Vec<u8> {
    let mut aad = Vec::with_capacity(VER_LEN + v1::CREATED_LEN);
    aad.push(version);
    aad.extend_from_slice(&created.to_be_bytes());
    aad
}

/// Parses a sealed file.
///
/// # Errors
///
/// Returns [`Error::Format`] if the data is empty, uses an unknown
/// version, or is too short for its version.
pub fn parse(data: &[u8]) -> Result<CipherBlob> {
    let Some(&version) = data.first() else {
        return Err(Error::Format("file is empty".into()));
    };

    match version {
        v1::VERSION_V1 => v1::parse(data),
        _ => Err(Error::Format(format!("unsupported version: {version}"))),
    }
}

/// Serializes a blob in its own version's layout.
pub fn serialize(blob: &CipherBlob) -> Result<Vec<u8>> {
    match blob.version() {
        v1::VERSION_V1 => v1::serialize(blob),
        v => Err(Error::Format(format!("unsupported version: {v}"))),
    }
}
