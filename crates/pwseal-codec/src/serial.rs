//! Value serialization
//!
//! JSON is self-describing, so a blob's payload stays readable by any decoder
//! that knows the target shape. Round-trips are exact for every type whose
//! serde impls are symmetric. Values JSON would store lossily (non-finite
//! floats, `Some` around a null-like value such as `Some(None)`) are rejected
//! up front.

use pwseal_core::SealResult;
use serde::{de::DeserializeOwned, Serialize};

use crate::lossless;

/// Serialize `value` to its canonical byte form.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> SealResult<Vec<u8>> {
    lossless::check(value)?;
    Ok(serde_json::to_vec(value)?)
}

/// Deserialize a value from bytes produced by [`to_bytes`].
///
/// Malformed, truncated, or trailing input is rejected.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> SealResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}
