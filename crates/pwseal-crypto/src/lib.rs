//! pwseal-crypto: password-sealed, integrity-checked blobs
//!
//! Pipeline:
//! ```text
//! encrypt: value → JSON → zstd → AES-256-GCM(Argon2i(password, salt), nonce) → frame
//! decrypt: frame → Argon2i(password, salt) → AES-256-GCM open → zstd → JSON → value
//! ```
//!
//! Blob layout:
//! ```text
//! [version: u64 LE][salt: 64][nonce: 12][ciphertext || tag: rest]
//! ```
//!
//! Salt and nonce are drawn fresh from the OS for every call, so sealing the
//! same value twice never produces the same blob.

pub mod cipher;
pub mod envelope;
pub mod frame;
pub mod kdf;

pub use cipher::{generate_nonce, open, seal, Nonce};
pub use envelope::{decrypt, decrypt_into, encrypt, encrypt_with_checksum, Sealed};
pub use frame::Frame;
pub use kdf::{derive_key, generate_salt, DerivedKey, Salt};

pub use pwseal_codec::Checksum;
pub use pwseal_core::{FramingError, SealError, SealResult};
