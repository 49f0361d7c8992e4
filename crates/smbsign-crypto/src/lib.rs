//! SMB Signing Cryptographic Primitives
//!
//! Building blocks for SMB message signing. Pure functions with deterministic
//! outputs; no state is kept between calls.
//!
//! # Algorithms by Dialect
//!
//! ```text
//! SMB1            MD5(session_key || message)[..8]
//! SMB 2.0.2/2.1   HMAC-SHA256(session_key, message)[..16]
//! SMB 3.0/3.0.2   AES-CMAC(KDF(session_key, "SMB2AESCMAC\0", "SmbSign\0"), message)
//! SMB 3.1.1       AES-CMAC(KDF(session_key, "SMBSigningKey\0", preauth_hash), message)
//! ```
//!
//! The KDF is SP800-108 counter mode with HMAC-SHA256 as the PRF, as
//! profiled by MS-SMB2 3.1.4.2.
//!
//! # Security
//!
//! - Session and signing keys are zeroized on drop and redacted in `Debug`
//! - Derivation is deterministic, so a derived signing key may be cached for
//!   the lifetime of the session that produced it

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
pub mod kdf;
mod keys;
pub mod mac;

pub use error::KdfError;
pub use kdf::{
    SMB30_SIGNING_CONTEXT, SMB30_SIGNING_LABEL, SMB311_SIGNING_LABEL, counter_mode,
    derive_signing_key,
};
pub use keys::{SessionKey, SigningKey};
pub use mac::{LEGACY_SIGNATURE_SIZE, SIGNATURE_SIZE, aes_cmac, hmac_sha256, legacy_md5};
