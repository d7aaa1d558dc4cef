//! Encrypt / decrypt entry points
//!
//! Every call draws its own salt and nonce and owns its buffers, so calls may
//! run concurrently from any number of threads. Any failure aborts the whole
//! call; there is no retry and no partial result.

use pwseal_codec::{compress, decompress, from_bytes, to_bytes, Checksum};
use pwseal_core::SealResult;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use crate::cipher::{self, Nonce};
use crate::frame::Frame;
use crate::kdf::{derive_key, generate_salt, DerivedKey, Salt};

/// A sealed blob together with its SHA-512 checksum.
#[derive(Debug, Clone)]
pub struct Sealed {
    pub blob: Vec<u8>,
    pub checksum: Checksum,
}

/// Seal `value` under `password`.
#[instrument(level = "debug", skip_all)]
pub fn encrypt<T: Serialize + ?Sized>(password: &[u8], value: &T) -> SealResult<Vec<u8>> {
    let serialized = Zeroizing::new(to_bytes(value)?);
    let compressed = Zeroizing::new(compress(&serialized)?);
    debug!(
        serialized = serialized.len(),
        compressed = compressed.len(),
        "encoded payload"
    );

    let salt = generate_salt()?;
    let nonce = cipher::generate_nonce()?;
    let key = derive_key(password, &salt)?;

    let blob = seal_payload(&key, &salt, &nonce, &compressed)?;
    debug!(blob = blob.len(), "sealed blob");
    Ok(blob)
}

/// Seal `value` and also return the checksum of the exact output bytes.
pub fn encrypt_with_checksum<T: Serialize + ?Sized>(
    password: &[u8],
    value: &T,
) -> SealResult<Sealed> {
    let blob = encrypt(password, value)?;
    let checksum = Checksum::of(&blob);
    Ok(Sealed { blob, checksum })
}

/// Open a blob produced by [`encrypt`].
///
/// Framing is validated before any key is derived. Nothing is returned unless
/// the GCM tag verifies.
#[instrument(level = "debug", skip_all, fields(blob = blob.len()))]
pub fn decrypt<T: DeserializeOwned>(blob: &[u8], password: &[u8]) -> SealResult<T> {
    let frame = Frame::parse(blob)?;
    let key = derive_key(password, frame.salt())?;

    let compressed = open_payload(&key, &frame)?;
    let serialized = Zeroizing::new(decompress(&compressed)?);
    debug!(
        compressed = compressed.len(),
        serialized = serialized.len(),
        "opened blob"
    );

    from_bytes(&serialized)
}

/// Open a blob into `out`, which is assigned only when every stage succeeds.
pub fn decrypt_into<T: DeserializeOwned>(
    blob: &[u8],
    password: &[u8],
    out: &mut T,
) -> SealResult<()> {
    *out = decrypt(blob, password)?;
    Ok(())
}

fn seal_payload(
    key: &DerivedKey,
    salt: &Salt,
    nonce: &Nonce,
    payload: &[u8],
) -> SealResult<Vec<u8>> {
    let ciphertext = cipher::seal(key, nonce, payload)?;
    Ok(Frame::assemble(salt, nonce, &ciphertext))
}

fn open_payload(key: &DerivedKey, frame: &Frame<'_>) -> SealResult<Zeroizing<Vec<u8>>> {
    cipher::open(key, frame.nonce(), frame.ciphertext())
}
