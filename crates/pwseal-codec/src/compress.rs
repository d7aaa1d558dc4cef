//! zstd compression of serialized payloads
//!
//! Compression runs before encryption: ciphertext is indistinguishable from
//! random and would not shrink. Frames carry zstd's content checksum, so a
//! decoder detects corruption even though the AEAD tag has already vouched
//! for the bytes.

use std::io::{Read, Write};

use pwseal_core::format::COMPRESSION_LEVEL;
use pwseal_core::{SealError, SealResult};

/// Compress `data` into a single checksummed zstd frame.
pub fn compress(data: &[u8]) -> SealResult<Vec<u8>> {
    compress_with_level(data, COMPRESSION_LEVEL)
}

/// Compress at an explicit zstd level. The level is not recorded on the wire.
pub fn compress_with_level(data: &[u8], level: i32) -> SealResult<Vec<u8>> {
    let mut encoder = zstd::stream::write::Encoder::new(
        Vec::with_capacity(data.len() / 2 + 64),
        level,
    )
    .map_err(SealError::Compression)?;
    encoder
        .include_checksum(true)
        .map_err(SealError::Compression)?;
    encoder.write_all(data).map_err(SealError::Compression)?;
    let out = encoder.finish().map_err(SealError::Compression)?;

    tracing::trace!(input = data.len(), output = out.len(), "compressed payload");
    Ok(out)
}

/// Decompress a stream produced by [`compress`], reading it to the end.
///
/// Corrupt, truncated, or checksum-mismatched input fails with
/// [`SealError::Compression`].
pub fn decompress(data: &[u8]) -> SealResult<Vec<u8>> {
    let mut decoder = zstd::stream::read::Decoder::new(data).map_err(SealError::Compression)?;
    let mut out = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut out)
        .map_err(SealError::Compression)?;

    tracing::trace!(input = data.len(), output = out.len(), "decompressed payload");
    Ok(out)
}
