//! pwseal-codec: the plaintext side of the seal pipeline
//!
//! # Overview
//! - `serial`: any serde value ⇄ canonical JSON bytes
//! - `compress`: checksummed zstd stream, applied before encryption
//! - `checksum`: SHA-512 over a finished blob, for out-of-band comparison

pub mod checksum;
pub mod compress;
mod lossless;
pub mod serial;

// Convenience re-exports for the most common operations
pub use checksum::{Checksum, ChecksumParseError};
pub use compress::{compress, decompress};
pub use serial::{from_bytes, to_bytes};
