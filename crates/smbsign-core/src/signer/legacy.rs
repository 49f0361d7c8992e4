//! SMB1 signing: MD5 over the session key and the message, keyed to a
//! per-session sequence number.

use smbsign_crypto::legacy_md5;

use super::{SignOutcome, Signer};
use crate::{SigningContext, SigningError, Smb1Packet};

/// SMB1 signing strategy.
///
/// The sequence number is written into `SecurityFeatures` before hashing, so
/// the server can only validate the signature if it expects the same number.
/// A skipped or duplicated increment desynchronizes the session for good.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySigner;

impl LegacySigner {
    /// Sign `packet` if signing is required and a session key exists.
    ///
    /// Infallible form of [`Signer::sign`].
    pub fn sign_message<P: Smb1Packet + ?Sized>(
        self,
        packet: &mut P,
        ctx: &mut SigningContext,
    ) -> SignOutcome {
        if !ctx.signing_required() || ctx.session_key().is_empty() {
            tracing::trace!(dialect = %ctx.dialect(), "SMB1 signing skipped");
            return SignOutcome::Skipped;
        }

        let sequence_number = ctx.next_sequence_number();
        packet.set_security_features(sequence_number.to_le_bytes());

        let signature = legacy_md5(ctx.session_key().as_bytes(), &packet.to_bytes());
        packet.set_security_features(signature);

        tracing::debug!(sequence_number, "signed SMB1 message");
        SignOutcome::Signed
    }
}

impl<P: Smb1Packet + ?Sized> Signer<P> for LegacySigner {
    fn sign(&self, packet: &mut P, ctx: &mut SigningContext) -> Result<SignOutcome, SigningError> {
        Ok(self.sign_message(packet, ctx))
    }
}
