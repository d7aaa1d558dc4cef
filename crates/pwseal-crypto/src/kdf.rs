//! Key derivation: Argon2i password + salt → 256-bit key

use argon2::{Algorithm, Argon2, Params, Version};
use pwseal_core::format::{KDF_MEM_COST_KIB, KDF_PARALLELISM, KDF_TIME_COST, KEY_SIZE, SALT_SIZE};
use pwseal_core::{SealError, SealResult};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Per-blob random salt.
pub type Salt = [u8; SALT_SIZE];

/// A 256-bit key derived from a password via Argon2i. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Argon2i cost parameters. Only [`KdfParams::V1`] ever reaches a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KdfParams {
    pub(crate) mem_cost_kib: u32,
    pub(crate) time_cost: u32,
    pub(crate) parallelism: u32,
}

impl KdfParams {
    pub(crate) const V1: Self = Self {
        mem_cost_kib: KDF_MEM_COST_KIB,
        time_cost: KDF_TIME_COST,
        parallelism: KDF_PARALLELISM,
    };
}

/// Derive the blob key for `password` and `salt` with the format's fixed
/// parameters. Deterministic: the same inputs always give the same key.
pub fn derive_key(password: &[u8], salt: &Salt) -> SealResult<DerivedKey> {
    derive_key_with_params(password, salt, &KdfParams::V1)
}

pub(crate) fn derive_key_with_params(
    password: &[u8],
    salt: &Salt,
    params: &KdfParams,
) -> SealResult<DerivedKey> {
    let argon2_params = Params::new(
        params.mem_cost_kib,
        params.time_cost,
        params.parallelism,
        Some(KEY_SIZE),
    )
    .map_err(|e| SealError::KeyDerivation(format!("invalid Argon2i params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2i, Version::V0x13, argon2_params);

    let mut key = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(password, salt, &mut key)
        .map_err(|e| SealError::KeyDerivation(e.to_string()))?;

    Ok(DerivedKey::from_bytes(key))
}

/// Draw a fresh salt from the OS entropy source.
pub fn generate_salt() -> SealResult<Salt> {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.try_fill_bytes(&mut salt)?;
    Ok(salt)
}
