//! Constants of the sealed blob format
//!
//! ```text
//! offset 0   : 8 bytes, little-endian u64 format version
//! offset 8   : 64 bytes, Argon2i salt
//! offset 72  : 12 bytes, AES-256-GCM nonce
//! offset 84  : ciphertext || 16-byte GCM tag
//! ```
//!
//! Everything here is fixed by the version tag. Decoding reconstructs the key
//! from password + salt alone, so none of these may vary per call.

/// Current format revision written by the encoder.
pub const VERSION: u64 = 1;

/// Width of the little-endian version field.
pub const VERSION_SIZE: usize = 8;

/// Argon2 salt length.
pub const SALT_SIZE: usize = 64;

/// AES-256-GCM standard nonce length (96-bit).
pub const NONCE_SIZE: usize = 12;

/// Derived symmetric key length (256-bit).
pub const KEY_SIZE: usize = 32;

/// GCM authentication tag length.
pub const TAG_SIZE: usize = 16;

/// Bytes preceding the ciphertext region.
pub const HEADER_SIZE: usize = VERSION_SIZE + SALT_SIZE + NONCE_SIZE;

/// SHA-512 digest length of the auxiliary checksum.
pub const CHECKSUM_SIZE: usize = 64;

/// Argon2i iterations.
pub const KDF_TIME_COST: u32 = 3;

/// Argon2i memory cost in KiB (32 MiB).
pub const KDF_MEM_COST_KIB: u32 = 32 * 1024;

/// Argon2i lanes.
pub const KDF_PARALLELISM: u32 = 4;

/// zstd level used when sealing. Not on the wire; any level decodes.
pub const COMPRESSION_LEVEL: i32 = 3;

/// Whether a decoder for this revision understands `version`.
pub fn is_supported_version(version: u64) -> bool {
    version == VERSION
}
