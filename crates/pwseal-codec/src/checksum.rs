//! SHA-512 checksum of a sealed blob
//!
//! An unkeyed digest the caller can print and compare through a separate
//! channel. It is never embedded in the blob and guards nothing on its own;
//! the AEAD tag is the integrity boundary.

use std::fmt;

use pwseal_core::format::CHECKSUM_SIZE;
use sha2::{Digest, Sha512};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChecksumParseError {
    #[error("invalid checksum hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// A 64-byte SHA-512 digest, displayed as 128 lowercase hex chars.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum([u8; CHECKSUM_SIZE]);

impl Checksum {
    /// Digest the exact bytes of `blob`.
    pub fn of(blob: &[u8]) -> Self {
        let digest = Sha512::digest(blob);
        let mut bytes = [0u8; CHECKSUM_SIZE];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; CHECKSUM_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; CHECKSUM_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 128-char hex string. Surrounding whitespace is ignored.
    pub fn from_hex(s: &str) -> Result<Self, ChecksumParseError> {
        let mut bytes = [0u8; CHECKSUM_SIZE];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Whether `blob` digests to this checksum.
    pub fn verify(&self, blob: &[u8]) -> bool {
        Self::of(blob) == *self
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Checksum").field(&self.to_hex()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // SHA-512("abc"), FIPS 180-2 appendix C.1
    const ABC_DIGEST: &str = "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
                              2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f";

    #[test]
    fn matches_known_vector() {
        assert_eq!(Checksum::of(b"abc").to_hex(), ABC_DIGEST);
    }

    #[test]
    fn hex_roundtrip() {
        let sum = Checksum::of(b"sealed blob bytes");
        let hex = sum.to_hex();
        assert_eq!(hex.len(), 2 * CHECKSUM_SIZE);
        assert_eq!(Checksum::from_hex(&hex).unwrap(), sum);
        assert_eq!(Checksum::from_hex(&format!("  {hex}\n")).unwrap(), sum);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(Checksum::from_hex("abc").is_err());
        assert!(Checksum::from_hex(&"zz".repeat(CHECKSUM_SIZE)).is_err());
        assert!(Checksum::from_hex(&"00".repeat(CHECKSUM_SIZE + 1)).is_err());
    }

    #[test]
    fn verify_detects_change() {
        let blob = b"some bytes".to_vec();
        let sum = Checksum::of(&blob);
        assert!(sum.verify(&blob));
        let mut changed = blob.clone();
        changed[0] ^= 1;
        assert!(!sum.verify(&changed));
    }

    proptest! {
        #[test]
        fn digest_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
            prop_assert_eq!(Checksum::of(&data), Checksum::of(&data));
        }
    }
}
