//! Versioned blob framing
//!
//! ```text
//! [8 bytes: version, u64 LE][64 bytes: salt][12 bytes: nonce][ciphertext || tag]
//! ```
//!
//! Parsing slices strictly left to right and stops at the first missing
//! field, so structural damage is reported before any key is derived. The
//! ciphertext region may be arbitrarily short; AEAD open is its validator.

use pwseal_core::format::{self, NONCE_SIZE, SALT_SIZE, VERSION, VERSION_SIZE};
use pwseal_core::FramingError;

use crate::cipher::Nonce;
use crate::kdf::Salt;

/// A borrowed view over a sealed blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    version: u64,
    salt: &'a Salt,
    nonce: &'a Nonce,
    ciphertext: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Split `data` into its fields without touching any key material.
    pub fn parse(data: &'a [u8]) -> Result<Self, FramingError> {
        let (version, rest) = data
            .split_first_chunk::<VERSION_SIZE>()
            .ok_or(FramingError::MissingVersion)?;
        let version = u64::from_le_bytes(*version);
        if !format::is_supported_version(version) {
            return Err(FramingError::InvalidVersion(version));
        }

        let (salt, rest) = rest
            .split_first_chunk::<SALT_SIZE>()
            .ok_or(FramingError::MissingSalt)?;
        let (nonce, ciphertext) = rest
            .split_first_chunk::<NONCE_SIZE>()
            .ok_or(FramingError::MissingNonce)?;

        Ok(Self {
            version,
            salt,
            nonce,
            ciphertext,
        })
    }

    /// Lay out a current-version blob in one buffer.
    pub fn assemble(salt: &Salt, nonce: &Nonce, ciphertext: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(format::HEADER_SIZE + ciphertext.len());
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(salt);
        out.extend_from_slice(nonce);
        out.extend_from_slice(ciphertext);
        out
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn salt(&self) -> &'a Salt {
        self.salt
    }

    pub fn nonce(&self) -> &'a Nonce {
        self.nonce
    }

    /// Ciphertext with the trailing GCM tag.
    pub fn ciphertext(&self) -> &'a [u8] {
        self.ciphertext
    }

    pub fn header_len(&self) -> usize {
        format::HEADER_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use pwseal_core::format::HEADER_SIZE;

    fn sample() -> Vec<u8> {
        Frame::assemble(&[0x11; SALT_SIZE], &[0x22; NONCE_SIZE], b"ciphertext+tag")
    }

    #[test]
    fn assemble_lays_out_fields_in_order() {
        let blob = sample();
        assert_eq!(&blob[..8], &1u64.to_le_bytes());
        assert!(blob[8..72].iter().all(|&b| b == 0x11));
        assert!(blob[72..84].iter().all(|&b| b == 0x22));
        assert_eq!(&blob[84..], b"ciphertext+tag");
    }

    #[test]
    fn parse_reads_back_fields() {
        let blob = sample();
        let frame = Frame::parse(&blob).unwrap();
        assert_eq!(frame.version(), VERSION);
        assert_eq!(frame.salt(), &[0x11; SALT_SIZE]);
        assert_eq!(frame.nonce(), &[0x22; NONCE_SIZE]);
        assert_eq!(frame.ciphertext(), b"ciphertext+tag");
        assert_eq!(frame.header_len(), HEADER_SIZE);
    }

    #[test]
    fn missing_version() {
        let blob = sample();
        for len in 0..VERSION_SIZE {
            assert_eq!(Frame::parse(&blob[..len]), Err(FramingError::MissingVersion));
        }
    }

    #[test]
    fn invalid_version_checked_before_salt() {
        for version in [0u64, 2, 0x0100_0000_0000_0000, u64::MAX] {
            let mut blob = version.to_le_bytes().to_vec();
            assert_eq!(
                Frame::parse(&blob),
                Err(FramingError::InvalidVersion(version))
            );
            blob.extend_from_slice(&[0u8; 200]);
            assert_eq!(
                Frame::parse(&blob),
                Err(FramingError::InvalidVersion(version))
            );
        }
    }

    #[test]
    fn version_is_little_endian() {
        let mut blob = sample();
        blob[..8].copy_from_slice(&1u64.to_be_bytes());
        assert_eq!(
            Frame::parse(&blob),
            Err(FramingError::InvalidVersion(1u64.swap_bytes()))
        );
    }

    #[test]
    fn missing_salt() {
        let blob = sample();
        for len in VERSION_SIZE..VERSION_SIZE + SALT_SIZE {
            assert_eq!(Frame::parse(&blob[..len]), Err(FramingError::MissingSalt));
        }
    }

    #[test]
    fn missing_nonce() {
        let blob = sample();
        for len in VERSION_SIZE + SALT_SIZE..HEADER_SIZE {
            assert_eq!(Frame::parse(&blob[..len]), Err(FramingError::MissingNonce));
        }
    }

    #[test]
    fn empty_ciphertext_region_parses() {
        let blob = sample();
        let frame = Frame::parse(&blob[..HEADER_SIZE]).unwrap();
        assert!(frame.ciphertext().is_empty());
    }

    proptest! {
        #[test]
        fn assemble_parse_identity(
            salt in proptest::array::uniform32(any::<u8>()),
            nonce in proptest::array::uniform12(any::<u8>()),
            body in proptest::collection::vec(any::<u8>(), 0..=256),
        ) {
            let mut full_salt = [0u8; SALT_SIZE];
            full_salt[..32].copy_from_slice(&salt);
            full_salt[32..].copy_from_slice(&salt);

            let blob = Frame::assemble(&full_salt, &nonce, &body);
            prop_assert_eq!(blob.len(), HEADER_SIZE + body.len());

            let frame = Frame::parse(&blob).unwrap();
            prop_assert_eq!(frame.salt(), &full_salt);
            prop_assert_eq!(frame.nonce(), &nonce);
            prop_assert_eq!(frame.ciphertext(), body.as_slice());
        }

        #[test]
        fn parse_never_panics(data in proptest::collection::vec(any::<u8>(), 0..=128)) {
            let _ = Frame::parse(&data);
        }
    }
}
