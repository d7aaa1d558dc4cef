//! pwseal-core: shared format constants, error taxonomy, and config schema

pub mod config;
pub mod error;
pub mod format;

pub use error::{FramingError, SealError, SealResult};
