//! Signing errors.
//!
//! Skipped signing (no session key yet, signing not required) is not an
//! error. Errors here mean the session is misconfigured and the message must
//! not be transmitted; none of them are transient.

use thiserror::Error;

use crate::Dialect;

/// Errors raised while signing an outbound message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// SMB3 signing was requested on a context negotiated for another dialect.
    #[error("dialect {0} is incompatible with SMBv3 signing")]
    IncompatibleDialect(Dialect),

    /// SMB 3.1.1 key derivation needs the preauth integrity hash as context.
    #[error("dialect 0x0311 signing requires a preauth integrity hash")]
    MissingPreauthIntegrityHash,
}
