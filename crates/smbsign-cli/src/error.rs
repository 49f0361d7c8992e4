//! CLI error types.

use smbsign_core::{Dialect, DialectParseError, SigningError};
use smbsign_proto::ProtocolError;
use thiserror::Error;

/// Errors reported by the `smbsign` binary.
#[derive(Error, Debug)]
pub enum CliError {
    /// An argument was not valid hex
    #[error("invalid hex in {field}: {source}")]
    InvalidHex {
        /// Which argument failed
        field: &'static str,
        /// Decoder error
        #[source]
        source: hex::FromHexError,
    },

    /// Dialect argument not recognized
    #[error(transparent)]
    Dialect(#[from] DialectParseError),

    /// Packet header failed to decode
    #[error("malformed packet: {0}")]
    Protocol(#[from] ProtocolError),

    /// Packet magic is neither SMB1 nor SMB2
    #[error("unknown protocol id: {0:02x?}")]
    UnknownProtocol([u8; 4]),

    /// Dialect and packet framing belong to different generations
    #[error("dialect {dialect} cannot sign {framing} packets")]
    FamilyMismatch {
        /// Requested dialect
        dialect: Dialect,
        /// Framing found in the packet
        framing: &'static str,
    },

    /// Signing failed
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// Writing the result failed
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Wrap a hex decoding failure for `field`.
    pub fn hex(field: &'static str) -> impl FnOnce(hex::FromHexError) -> Self {
        move |source| Self::InvalidHex { field, source }
    }
}
