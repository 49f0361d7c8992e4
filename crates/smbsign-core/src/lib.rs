//! SMB Outbound Message Signing
//!
//! Decides, per outgoing message and per negotiated dialect, whether the
//! message carries a signature, and computes it with the algorithm that
//! dialect requires.
//!
//! # Architecture
//!
//! ```text
//!  authentication ──► session key ─┐
//!  negotiation ─────► dialect ─────┼──► SigningContext
//!                     preauth hash ┘         │
//!                                            ▼
//!  sign_smb1 ──► LegacySigner   MD5, 8-byte signature, sequence counter
//!  sign_smb2 ─┬► HmacSigner     HMAC-SHA256            (2.0.2, 2.1)
//!             └► CmacSigner     KDF + AES-CMAC         (3.0, 3.0.2, 3.1.1)
//! ```
//!
//! The caller builds a [`SigningContext`] once session setup completes and
//! calls the entry point for its protocol family immediately before each
//! message is transmitted. Signing mutates header fields in place.
//!
//! # Invariants
//!
//! - Nothing is signed while the session key is empty
//! - The sequence counter advances exactly once per signed SMB1 message and
//!   never for SMB2/3
//! - A `SigningError` leaves the message untouched; the caller must not send
//!   it
//!
//! Contexts shared between senders go through [`SharedSigningContext`], which
//! serializes counter reads and increments.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod context;
mod dialect;
mod error;
mod packet;
mod shared;
pub mod signer;

pub use config::SigningConfig;
pub use context::SigningContext;
pub use dialect::{Dialect, DialectParseError, ProtocolFamily};
pub use error::SigningError;
pub use packet::{Smb1Packet, Smb2Packet};
pub use shared::SharedSigningContext;
pub use signer::{CmacSigner, HmacSigner, LegacySigner, SignOutcome, Signer, sign_smb1, sign_smb2};
pub use smbsign_crypto::{SessionKey, SigningKey};
