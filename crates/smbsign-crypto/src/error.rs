//! Key derivation errors.

use thiserror::Error;

/// Errors from the counter-mode KDF.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfError {
    /// Requested output length does not fit the 32-bit `L` field.
    #[error("requested {requested} bytes of key material, at most {max} supported")]
    OutputTooLong {
        /// Requested output length in bytes
        requested: usize,
        /// Maximum output length in bytes
        max: usize,
    },
}
