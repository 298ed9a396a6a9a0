use chacha20poly1305::Key;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use super::KEY_LEN;

/// Symmetric key derived from a password.
///
/// The bytes are wiped when the key is dropped.
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// The key in the form the cipher expects.
    pub fn as_cipher_key(&self) -> &Key {
        Key::from_slice(&self.bytes)
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Derive the encryption key from a password.
///
/// SHA-256 over the UTF-8 bytes, no salt: the same password always gives
/// the same key, so a sealed file needs nothing but the password to open.
pub fn derive_key(password: &str) -> DerivedKey {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());

    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&hasher.finalize());

    DerivedKey { bytes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kdf_is_deterministic() {
        let k1 = derive_key("password");
        let k2 = derive_key("password");

        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_passwords_give_different_keys() {
        let k1 = derive_key("pw1");
        let k2 = derive_key("pw2");

        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn empty_password_is_accepted() {
        // SHA-256 of the empty string
        let key = derive_key("");
        assert_eq!(key.as_bytes()[..4], [0xe3, 0xb0, 0xc4, 0x42]);
    }

    #[test]
    fn key_is_sha256_of_utf8_password() {
        let key = derive_key("abc");
        assert_eq!(
            key.as_bytes()[..8],
            [0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea]
        );
    }

    #[test]
    fn cipher_key_matches_raw_bytes() {
        let key = derive_key("pw");
        assert_eq!(key.as_cipher_key().as_slice(), key.as_bytes());
    }
}
