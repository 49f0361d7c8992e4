//! Command-line front end for SMB message signing.
//!
//! Takes a session key, a dialect and a raw packet (all hex), signs the packet
//! with the same entry points a client would use, and hands back the signed
//! bytes. Useful for checking signatures against captures from another
//! implementation.
//!
//! The binary is a thin wrapper: [`SignRequest`] carries the parsed
//! arguments, [`sign_packet`] does the work.

#![forbid(unsafe_code)]

mod error;

pub use error::CliError;
use smbsign_core::{
    Dialect, ProtocolFamily, SignOutcome, SigningConfig, SigningContext, sign_smb1, sign_smb2,
};
use smbsign_proto::{Smb1Header, Smb1Message, Smb2Header, Smb2Message};

/// Everything needed to sign one packet.
#[derive(Debug, Clone)]
pub struct SignRequest {
    /// Negotiated dialect
    pub dialect: Dialect,
    /// Raw session key from authentication
    pub session_key: Vec<u8>,
    /// SMB 3.1.1 preauth integrity hash
    pub preauth_hash: Option<Vec<u8>>,
    /// Signing policy
    pub config: SigningConfig,
}

impl SignRequest {
    /// Build the signing context this request describes.
    pub fn context(&self) -> SigningContext {
        let ctx = SigningContext::from_config(self.session_key.clone(), self.dialect, self.config);
        match &self.preauth_hash {
            Some(hash) => ctx.with_preauth_integrity_hash(hash.clone()),
            None => ctx,
        }
    }
}

/// Result of signing a packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signed {
    /// Whether a signature was written
    pub outcome: SignOutcome,
    /// Packet bytes after signing
    pub bytes: Vec<u8>,
}

/// Decode `packet`, sign it under `request` and re-encode it.
///
/// The header magic picks SMB1 or SMB2 framing; the dialect must belong to
/// the matching family.
///
/// # Errors
///
/// - `CliError::Protocol` if the header does not decode
/// - `CliError::UnknownProtocol` if the magic is neither SMB1 nor SMB2
/// - `CliError::FamilyMismatch` if the dialect cannot sign this framing
/// - `CliError::Signing` if SMB3 key derivation fails
pub fn sign_packet(request: &SignRequest, packet: &[u8]) -> Result<Signed, CliError> {
    let mut ctx = request.context();
    let is_smb1 = request.dialect.family() == ProtocolFamily::Smb1;

    match packet.get(..4) {
        Some(magic) if magic == Smb1Header::PROTOCOL_ID => {
            if !is_smb1 {
                return Err(CliError::FamilyMismatch { dialect: request.dialect, framing: "SMB1" });
            }
            let mut message = Smb1Message::decode(packet)?;
            let outcome = sign_smb1(&mut message, &mut ctx);
            Ok(Signed { outcome, bytes: message.to_vec() })
        },
        Some(magic) if magic == Smb2Header::PROTOCOL_ID => {
            if is_smb1 {
                return Err(CliError::FamilyMismatch { dialect: request.dialect, framing: "SMB2" });
            }
            let mut message = Smb2Message::decode(packet)?;
            let outcome = sign_smb2(&mut message, &mut ctx)?;
            Ok(Signed { outcome, bytes: message.to_vec() })
        },
        Some(magic) => {
            let mut id = [0u8; 4];
            id.copy_from_slice(magic);
            Err(CliError::UnknownProtocol(id))
        },
        None => Err(smbsign_proto::ProtocolError::PacketTooShort {
            expected: Smb1Header::SIZE,
            actual: packet.len(),
        }
        .into()),
    }
}
