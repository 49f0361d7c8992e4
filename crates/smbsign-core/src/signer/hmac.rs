//! SMB 2.0.2 / 2.1 signing: HMAC-SHA256 keyed directly with the session key.

use smbsign_crypto::hmac_sha256;

use super::{SignOutcome, Signer};
use crate::{SigningContext, SigningError, Smb2Packet};

/// SMB 2.x signing strategy. Never touches the sequence counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSigner;

impl HmacSigner {
    /// Sign `packet` if signing is required and a session key exists.
    ///
    /// Infallible form of [`Signer::sign`].
    pub fn sign_message<P: Smb2Packet + ?Sized>(
        self,
        packet: &mut P,
        ctx: &SigningContext,
    ) -> SignOutcome {
        if !ctx.signing_required() || ctx.session_key().is_empty() {
            tracing::trace!(dialect = %ctx.dialect(), "SMB2 signing skipped");
            return SignOutcome::Skipped;
        }

        // The signature covers the flag and a zeroed signature field
        packet.set_signed();
        packet.set_signature([0; 16]);
        let signature = hmac_sha256(ctx.session_key().as_bytes(), &packet.to_bytes());
        packet.set_signature(signature);

        tracing::debug!(dialect = %ctx.dialect(), "signed SMB2 message");
        SignOutcome::Signed
    }
}

impl<P: Smb2Packet + ?Sized> Signer<P> for HmacSigner {
    fn sign(&self, packet: &mut P, ctx: &mut SigningContext) -> Result<SignOutcome, SigningError> {
        Ok(self.sign_message(packet, ctx))
    }
}
