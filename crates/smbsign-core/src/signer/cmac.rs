//! SMB 3.x signing: AES-128-CMAC keyed with a signing key derived from the
//! session key.
//!
//! # Key Derivation
//!
//! | dialect       | label              | context              |
//! |---------------|--------------------|----------------------|
//! | 3.0, 3.0.2    | `"SMB2AESCMAC\0"`  | `"SmbSign\0"`        |
//! | 3.1.1         | `"SMBSigningKey\0"`| preauth integrity hash |
//!
//! Derivation is deterministic and the inputs are fixed for the life of the
//! session, so the key is cached in the context unless the policy says
//! otherwise.

use smbsign_crypto::{
    SMB30_SIGNING_CONTEXT, SMB30_SIGNING_LABEL, SMB311_SIGNING_LABEL, SigningKey, aes_cmac,
    derive_signing_key,
};

use super::{SignOutcome, Signer};
use crate::{Dialect, SigningContext, SigningError, Smb2Packet};

/// SMB 3.x signing strategy.
///
/// Signs when a session key exists and either the session requires signing
/// or the message is a tree connect request. Tree connects are always signed
/// so the tree is bound to the authenticated session.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmacSigner;

impl CmacSigner {
    /// Signing key for the context's dialect, from cache or freshly derived.
    ///
    /// # Errors
    ///
    /// - `IncompatibleDialect`: the dialect is not 3.0, 3.0.2 or 3.1.1
    /// - `MissingPreauthIntegrityHash`: 3.1.1 without a preauth hash
    pub fn signing_key(self, ctx: &mut SigningContext) -> Result<SigningKey, SigningError> {
        if let Some(key) = ctx.cached_signing_key() {
            return Ok(key.clone());
        }

        let key = {
            let (label, context) = key_derivation_inputs(ctx)?;
            derive_signing_key(ctx.session_key().as_bytes(), label, context)
        };
        ctx.store_signing_key(&key);

        tracing::debug!(dialect = %ctx.dialect(), "derived SMB3 signing key");
        Ok(key)
    }
}

impl<P: Smb2Packet + ?Sized> Signer<P> for CmacSigner {
    fn sign(&self, packet: &mut P, ctx: &mut SigningContext) -> Result<SignOutcome, SigningError> {
        let tree_connect = packet.is_tree_connect_request();
        if ctx.session_key().is_empty() || !(ctx.signing_required() || tree_connect) {
            tracing::trace!(dialect = %ctx.dialect(), "SMB3 signing skipped");
            return Ok(SignOutcome::Skipped);
        }

        // Derive before touching the packet so a failure leaves it unmodified
        let signing_key = self.signing_key(ctx).inspect_err(|e| {
            tracing::warn!(dialect = %ctx.dialect(), error = %e, "SMB3 signing failed");
        })?;

        // The signature covers the flag and a zeroed signature field
        packet.set_signed();
        packet.set_signature([0; 16]);
        let signature = aes_cmac(&signing_key, &packet.to_bytes());
        packet.set_signature(signature);

        tracing::debug!(dialect = %ctx.dialect(), tree_connect, "signed SMB3 message");
        Ok(SignOutcome::Signed)
    }
}

/// KDF label and context for `ctx`'s dialect.
fn key_derivation_inputs(ctx: &SigningContext) -> Result<(&'static [u8], &[u8]), SigningError> {
    match ctx.dialect() {
        Dialect::Smb300 | Dialect::Smb302 => Ok((SMB30_SIGNING_LABEL, SMB30_SIGNING_CONTEXT)),
        Dialect::Smb311 => {
            let hash =
                ctx.preauth_integrity_hash().ok_or(SigningError::MissingPreauthIntegrityHash)?;
            Ok((SMB311_SIGNING_LABEL, hash))
        },
        dialect @ (Dialect::Smb1 | Dialect::Smb202 | Dialect::Smb210) => {
            Err(SigningError::IncompatibleDialect(dialect))
        },
    }
}
