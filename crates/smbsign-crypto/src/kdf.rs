//! SP800-108 counter-mode key derivation with HMAC-SHA256
//!
//! Each output block is `HMAC(Ki, [i]_32 || Label || 0x00 || Context || [L]_32)`
//! with big-endian `i` starting at 1 and `L` the output length in bits.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{error::KdfError, keys::SigningKey};

type HmacSha256 = Hmac<Sha256>;

/// PRF output size (HMAC-SHA256)
const PRF_OUTPUT_SIZE: usize = 32;

/// Largest output whose bit length fits the 32-bit `L` field.
const MAX_OUTPUT_LEN: usize = (u32::MAX / 8) as usize;

/// Signing key label for SMB 3.0 and 3.0.2
pub const SMB30_SIGNING_LABEL: &[u8] = b"SMB2AESCMAC\0";

/// Signing key context for SMB 3.0 and 3.0.2
pub const SMB30_SIGNING_CONTEXT: &[u8] = b"SmbSign\0";

/// Signing key label for SMB 3.1.1 (context is the preauth integrity hash)
pub const SMB311_SIGNING_LABEL: &[u8] = b"SMBSigningKey\0";

/// Fill `out` with key material derived from `key`, `label` and `context`.
///
/// The output length is part of the PRF input, so truncating a longer
/// derivation does not produce the same bytes as a shorter one.
///
/// # Errors
///
/// - `OutputTooLong`: if `out.len() * 8` does not fit in a `u32`
pub fn counter_mode(
    key: &[u8],
    label: &[u8],
    context: &[u8],
    out: &mut [u8],
) -> Result<(), KdfError> {
    let output_bits = u32::try_from(out.len())
        .ok()
        .and_then(|len| len.checked_mul(8))
        .ok_or(KdfError::OutputTooLong { requested: out.len(), max: MAX_OUTPUT_LEN })?;

    for (index, block) in out.chunks_mut(PRF_OUTPUT_SIZE).enumerate() {
        // Bounded by MAX_OUTPUT_LEN / 32, well inside u32
        let counter = index as u32 + 1;

        let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
            unreachable!("HMAC-SHA256 accepts any key size");
        };
        mac.update(&counter.to_be_bytes());
        mac.update(label);
        mac.update(&[0x00]);
        mac.update(context);
        mac.update(&output_bits.to_be_bytes());

        let prf = mac.finalize().into_bytes();
        block.copy_from_slice(&prf[..block.len()]);
    }

    Ok(())
}

/// Derive a 128-bit signing key from the session key.
///
/// # Security
///
/// - Deterministic: same session key, label and context give the same key
/// - Different labels or contexts give unrelated keys
pub fn derive_signing_key(session_key: &[u8], label: &[u8], context: &[u8]) -> SigningKey {
    let mut key = [0u8; SigningKey::SIZE];
    let Ok(()) = counter_mode(session_key, label, context, &mut key) else {
        unreachable!("16 bytes is a valid KDF output length");
    };
    SigningKey::from_bytes(key)
}
