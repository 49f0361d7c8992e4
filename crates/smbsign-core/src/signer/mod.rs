//! Signing strategies and the per-family entry points.
//!
//! Each strategy is a unit value implementing [`Signer`]. Which one applies
//! is decided by the caller's protocol family: SMB1 traffic goes through
//! [`sign_smb1`], SMB2/3 traffic through [`sign_smb2`], which picks HMAC or
//! CMAC from the negotiated dialect.

mod cmac;
mod hmac;
mod legacy;

pub use cmac::CmacSigner;
pub use hmac::HmacSigner;
pub use legacy::LegacySigner;

use crate::{Dialect, SigningContext, SigningError, Smb1Packet, Smb2Packet};

/// Result of a signing call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutcome {
    /// Signature written into the message
    Signed,
    /// Preconditions not met; message untouched
    Skipped,
}

impl SignOutcome {
    /// True if the message now carries a signature.
    pub fn is_signed(self) -> bool {
        self == Self::Signed
    }
}

/// Capability to sign an outbound message of type `P`.
pub trait Signer<P: ?Sized> {
    /// Sign `packet` in place if the context calls for it.
    ///
    /// On error the packet and context are unchanged and the packet must not
    /// be sent.
    fn sign(&self, packet: &mut P, ctx: &mut SigningContext) -> Result<SignOutcome, SigningError>;
}

/// Sign an SMB1 message.
pub fn sign_smb1<P: Smb1Packet + ?Sized>(packet: &mut P, ctx: &mut SigningContext) -> SignOutcome {
    LegacySigner.sign_message(packet, ctx)
}

/// Sign an SMB2/3 message with the strategy for the negotiated dialect.
///
/// # Errors
///
/// Only the SMB3 strategy fails; see [`CmacSigner`].
pub fn sign_smb2<P: Smb2Packet + ?Sized>(
    packet: &mut P,
    ctx: &mut SigningContext,
) -> Result<SignOutcome, SigningError> {
    match ctx.dialect() {
        // SMB2 messages on a context that never left SMB1 follow the 2.x rules
        Dialect::Smb1 | Dialect::Smb202 | Dialect::Smb210 => {
            Ok(HmacSigner.sign_message(packet, ctx))
        },
        Dialect::Smb300 | Dialect::Smb302 | Dialect::Smb311 => CmacSigner.sign(packet, ctx),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use smbsign_proto::{Command, Smb1Header, Smb1Message, Smb2Header, Smb2Message};

    /// Session key `00 01 .. 0f`.
    pub fn session_key() -> Vec<u8> {
        (0u8..16).collect()
    }

    /// SMB1 `ECHO` request used by the fixed signature vectors.
    pub fn smb1_echo() -> Smb1Message {
        let mut header = Smb1Header::new(0x2B);
        header.set_flags(0x18);
        header.set_flags2(0xC807);
        header.set_tid(0xFFFF);
        header.set_pid(0xBEEF);
        header.set_uid(0x0800);
        header.set_mid(3);
        Smb1Message::new(header, vec![0x00, 0x00])
    }

    /// SMB2 `ECHO` request used by the fixed signature vectors.
    pub fn smb2_echo() -> Smb2Message {
        let mut header = Smb2Header::new(Command::Echo);
        header.set_message_id(7);
        header.set_session_id(0x0000_4000_0000_0011);
        Smb2Message::new(header, vec![0x04, 0x00, 0x00, 0x00])
    }

    /// SMB2 `TREE_CONNECT` request.
    pub fn smb2_tree_connect() -> Smb2Message {
        let mut header = Smb2Header::new(Command::TreeConnect);
        header.set_message_id(3);
        header.set_session_id(0x0000_4000_0000_0011);
        Smb2Message::new(header, vec![0x09, 0x00, 0x00, 0x00, 0x48, 0x00, 0x00, 0x00])
    }

    pub fn unhex(s: &str) -> Vec<u8> {
        hex::decode(s).expect("valid hex")
    }
}
