//! Cryptographic primitives for sealed files.
//!
//! Provides password-to-key derivation and the authenticated cipher.

pub mod aead;
pub mod kdf;

pub use aead::{decrypt, encrypt};
pub use kdf::{DerivedKey, derive_key};

/// Length of the nonce (24 bytes for XChaCha20-Poly1305).
pub const NONCE_LEN: usize = 24;
/// Length of the encryption key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the Poly1305 authentication tag.
pub const TAG_LEN: usize = 16;
