//! Zstandard compression of whole in-memory buffers.

use crate::error::{Error, Result};

/// Zstd compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(i32);

impl Default for CompressionLevel {
    fn default() -> Self {
        Self(zstd::DEFAULT_COMPRESSION_LEVEL)
    }
}

impl CompressionLevel {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 19;

    pub fn new(level: i32) -> Result<Self> {
        let level = Self(level);
        level.validate()?;
        Ok(level)
    }

    pub fn get(&self) -> i32 {
        self.0
    }

    pub fn validate(&self) -> Result<()> {
        if !(Self::MIN..=Self::MAX).contains(&self.0) {
            return Err(Error::InvalidLevel(self.0));
        }
        Ok(())
    }
}

pub fn compress(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    Ok(zstd::encode_all(data, level.get())?)
}

/// Decompress a zstd stream.
///
/// Anything that is not a complete zstd stream is [`Error::CorruptData`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    zstd::decode_all(data).map_err(|e| Error::CorruptData(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let data = b"hello hello hello hello".to_vec();
        let c = compress(&data, CompressionLevel::default()).unwrap();
        assert_eq!(decompress(&c).unwrap(), data);
    }

    #[test]
    fn empty_roundtrips() {
        let c = compress(&[], CompressionLevel::default()).unwrap();
        assert!(!c.is_empty());
        assert_eq!(decompress(&c).unwrap(), b"");
    }

    #[test]
    fn output_is_deterministic_for_fixed_level() {
        let data = vec![3u8; 4096];
        let level = CompressionLevel::new(9).unwrap();
        assert_eq!(compress(&data, level).unwrap(), compress(&data, level).unwrap());
    }

    #[test]
    fn repetitive_data_shrinks() {
        let data = b"abcdefgh".repeat(1024);
        let c = compress(&data, CompressionLevel::default()).unwrap();
        assert!(c.len() < data.len());
    }

    #[test]
    fn garbage_is_corrupt_data() {
        let result = decompress(b"definitely not a zstd frame");
        assert!(matches!(result, Err(Error::CorruptData(_))));
    }

    #[test]
    fn truncated_stream_is_corrupt_data() {
        let c = compress(&b"some text to compress".repeat(50), CompressionLevel::default()).unwrap();
        let result = decompress(&c[..c.len() / 2]);
        assert!(matches!(result, Err(Error::CorruptData(_))));
    }

    #[test]
    fn level_bounds_are_enforced() {
        assert!(CompressionLevel::new(0).is_err());
        assert!(CompressionLevel::new(20).is_err());
        assert_eq!(CompressionLevel::new(19).unwrap().get(), 19);
        assert!(CompressionLevel::default().validate().is_ok());
    }
}
