//! Header decoding errors.

use thiserror::Error;

/// Result alias for header parsing.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while decoding SMB headers from untrusted bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer is shorter than the fixed header size.
    #[error("packet too short: expected at least {expected} bytes, got {actual}")]
    PacketTooShort {
        /// Minimum number of bytes required
        expected: usize,
        /// Number of bytes available
        actual: usize,
    },

    /// The four-byte protocol identifier does not match the header family.
    #[error("invalid protocol id {0:02x?}")]
    InvalidProtocolId([u8; 4]),

    /// SMB2 `StructureSize` field is not 64.
    #[error("invalid SMB2 header structure size {0}")]
    InvalidStructureSize(u16),
}
