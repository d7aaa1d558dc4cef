//! AES-256-GCM sealing of compressed payloads
//!
//! No associated data. `open` is the only integrity gate of the format: it
//! either returns the full plaintext or [`SealError::Authentication`], never
//! partial output.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key,
};
use pwseal_core::format::{NONCE_SIZE, TAG_SIZE};
use pwseal_core::{SealError, SealResult};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::kdf::DerivedKey;

/// Per-blob random nonce. Must never repeat under one key.
pub type Nonce = [u8; NONCE_SIZE];

/// Draw a fresh nonce from the OS entropy source.
pub fn generate_nonce() -> SealResult<Nonce> {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.try_fill_bytes(&mut nonce)?;
    Ok(nonce)
}

fn cipher_for(key: &DerivedKey) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()))
}

/// Encrypt `plaintext`, returning `ciphertext || 16-byte tag`.
pub fn seal(key: &DerivedKey, nonce: &Nonce, plaintext: &[u8]) -> SealResult<Vec<u8>> {
    cipher_for(key)
        .encrypt(aes_gcm::Nonce::from_slice(nonce), plaintext)
        .map_err(|_| SealError::PayloadTooLarge)
}

/// Verify and decrypt `ciphertext || tag`.
///
/// The returned buffer is wiped when dropped.
pub fn open(key: &DerivedKey, nonce: &Nonce, sealed: &[u8]) -> SealResult<Zeroizing<Vec<u8>>> {
    if sealed.len() < TAG_SIZE {
        return Err(SealError::Authentication);
    }

    cipher_for(key)
        .decrypt(aes_gcm::Nonce::from_slice(nonce), sealed)
        .map(Zeroizing::new)
        .map_err(|_| SealError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwseal_core::format::KEY_SIZE;

    fn random_key() -> DerivedKey {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        DerivedKey::from_bytes(bytes)
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let key = random_key();
        let nonce = generate_nonce().unwrap();
        let plaintext = b"hello, sealed world!";

        let sealed = seal(&key, &nonce, plaintext).unwrap();
        let opened = open(&key, &nonce, &sealed).unwrap();

        assert_eq!(opened.as_slice(), plaintext);
    }

    #[test]
    fn test_seal_open_empty() {
        let key = random_key();
        let nonce = generate_nonce().unwrap();

        let sealed = seal(&key, &nonce, b"").unwrap();
        assert_eq!(sealed.len(), TAG_SIZE);
        assert!(open(&key, &nonce, &sealed).unwrap().is_empty());
    }

    #[test]
    fn test_sealed_size() {
        let key = random_key();
        let nonce = generate_nonce().unwrap();
        let sealed = seal(&key, &nonce, &[0u8; 1000]).unwrap();

        // plaintext (1000) + tag (16)
        assert_eq!(sealed.len(), 1000 + TAG_SIZE);
    }

    #[test]
    fn test_open_wrong_key() {
        let nonce = generate_nonce().unwrap();
        let sealed = seal(&random_key(), &nonce, b"secret data").unwrap();

        let err = open(&random_key(), &nonce, &sealed).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_open_wrong_nonce() {
        let key = random_key();
        let sealed = seal(&key, &generate_nonce().unwrap(), b"secret data").unwrap();

        let err = open(&key, &generate_nonce().unwrap(), &sealed).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_every_bit_flip_fails() {
        let key = random_key();
        let nonce = generate_nonce().unwrap();
        let sealed = seal(&key, &nonce, b"the age-old cry").unwrap();

        for byte in 0..sealed.len() {
            for bit in 0..8 {
                let mut tampered = sealed.clone();
                tampered[byte] ^= 1 << bit;
                let err = open(&key, &nonce, &tampered).unwrap_err();
                assert!(err.is_authentication(), "flip at {byte}:{bit} must fail");
            }
        }
    }

    #[test]
    fn test_short_input_fails_as_authentication() {
        let key = random_key();
        let nonce = generate_nonce().unwrap();
        for len in 0..TAG_SIZE {
            let err = open(&key, &nonce, &vec![0u8; len]).unwrap_err();
            assert!(err.is_authentication());
        }
    }

    #[test]
    fn test_nonces_are_fresh() {
        assert_ne!(generate_nonce().unwrap(), generate_nonce().unwrap());
    }
}
