//! Sealed file format v1.
//!
//! V1 File Format:
//! ```text
//! VERSION (1) | CREATED (8, big-endian) | NONCE (24) | CIPHERTEXT || TAG (>= 16)
//! ```
//!
//! VERSION and CREATED are the associated data of the AEAD.

use super::{CipherBlob, VER_LEN};
use crate::crypto::{NONCE_LEN, TAG_LEN};
use crate::error::{Error, Result};

/// Current file format version.
pub const VERSION_V1: u8 = 1;

pub(crate) const CREATED_LEN: usize = 8;

const HEADER_LEN: usize = VER_LEN + CREATED_LEN + NONCE_LEN;

/// Smallest valid v1 file: a header and the tag of an empty payload.
pub const MIN_LEN: usize = HEADER_LEN + TAG_LEN;

/// Parses a v1 sealed file.
///
/// # Errors
///
/// Returns an error if the file is too short to hold a header and tag.
pub fn parse(data: &[u8]) -> Result<CipherBlob> {
    if data.len() < MIN_LEN {
        return Err(Error::Format("file too short for v1".into()));
    }

    let mut offset = VER_LEN;

    let mut created = [0u8; CREATED_LEN];
    created.copy_from_slice(&data[offset..offset + CREATED_LEN]);
    offset += CREATED_LEN;

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&data[offset..offset + NONCE_LEN]);
    offset += NONCE_LEN;

    let ciphertext = data[offset..].to_vec();

    Ok(CipherBlob::new(u64::from_be_bytes(created), nonce, ciphertext))
}

/// Serializes a blob to v1 format bytes.
///
/// # Errors
///
/// Returns an error if the blob is not v1 or the payload cannot hold a tag.
pub fn serialize(blob: &CipherBlob) -> Result<Vec<u8>> {
    if blob.version() != VERSION_V1 {
        return Err(Error::Format("wrong version for v1 serializer".into()));
    }

    if blob.ciphertext().len() < TAG_LEN {
        return Err(Error::Format("payload shorter than the authentication tag".into()));
    }

    let mut buf = Vec::with_capacity(HEADER_LEN + blob.ciphertext().len());

    buf.push(VERSION_V1);
    buf.extend_from_slice(&blob.created().to_be_bytes());
    buf.extend_from_slice(blob.nonce());
    buf.extend_from_slice(blob.ciphertext());

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_roundtrip() {
        let blob = CipherBlob::new(1_700_000_000, [2u8; NONCE_LEN], vec![7u8; 30]);

        let bytes = serialize(&blob).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 30);
        assert_eq!(bytes[0], VERSION_V1);

        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.version(), VERSION_V1);
        assert_eq!(parsed.created(), 1_700_000_000);
        assert_eq!(parsed.nonce(), blob.nonce());
        assert_eq!(parsed.ciphertext(), blob.ciphertext());
    }

    #[test]
    fn too_short_fails() {
        let mut data = vec![0u8; MIN_LEN - 1];
        data[0] = VERSION_V1;

        assert!(parse(&data).is_err());
    }

    #[test]
    fn minimum_length_parses() {
        let mut data = vec![0u8; MIN_LEN];
        data[0] = VERSION_V1;

        let parsed = parse(&data).unwrap();
        assert_eq!(parsed.ciphertext().len(), TAG_LEN);
    }

    #[test]
    fn serialize_rejects_truncated_payload() {
        let blob = CipherBlob::new(0, [0u8; NONCE_LEN], vec![0u8; TAG_LEN - 1]);
        assert!(serialize(&blob).is_err());
    }
}
