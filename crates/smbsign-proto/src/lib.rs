//! SMB Header Layouts
//!
//! Fixed-size SMB1 and SMB2/3 message headers with zero-copy parsing, plus a
//! message type pairing a header with an opaque command body. Only the fields
//! the signing core touches get typed accessors beyond the basics; command
//! bodies are never interpreted.
//!
//! # Wire Layout
//!
//! ```text
//! SMB1 (32 bytes)                      SMB2/3 (64 bytes)
//! ┌──────────────────────────┐         ┌──────────────────────────┐
//! │ 0..4   FF 'S' 'M' 'B'    │         │ 0..4   FE 'S' 'M' 'B'    │
//! │ 4      command           │         │ 12..14 command           │
//! │ 14..22 security features │         │ 16..20 flags (SIGNED=8)  │
//! │ ...                      │         │ 48..64 signature         │
//! └──────────────────────────┘         └──────────────────────────┘
//! ```
//!
//! All multi-byte integers are little-endian, matching the SMB wire format.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
pub mod errors;
mod message;
mod smb1;
mod smb2;

pub use command::{Command, HeaderFlags};
pub use errors::{ProtocolError, Result};
pub use message::{Smb1Message, Smb2Message};
pub use smb1::Smb1Header;
pub use smb2::Smb2Header;
