//! Message authentication codes for each SMB signing generation
//!
//! Every function returns the truncated signature exactly as it is placed in
//! the header: 8 bytes for SMB1, 16 bytes for SMB2 and SMB3.

use aes::Aes128;
use cmac::Cmac;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;

use crate::keys::SigningKey;

type HmacSha256 = Hmac<Sha256>;
type Aes128Cmac = Cmac<Aes128>;

/// SMB1 `SecurityFeatures` signature size (8 bytes)
pub const LEGACY_SIGNATURE_SIZE: usize = 8;

/// SMB2/3 header signature size (16 bytes)
pub const SIGNATURE_SIZE: usize = 16;

/// SMB1 signature: first 8 bytes of `MD5(session_key || message)`.
///
/// `message` must already carry the sequence number in `SecurityFeatures`.
pub fn legacy_md5(session_key: &[u8], message: &[u8]) -> [u8; LEGACY_SIGNATURE_SIZE] {
    let mut hasher = Md5::new();
    hasher.update(session_key);
    hasher.update(message);
    let digest = hasher.finalize();

    let mut signature = [0u8; LEGACY_SIGNATURE_SIZE];
    signature.copy_from_slice(&digest[..LEGACY_SIGNATURE_SIZE]);
    signature
}

/// SMB 2.x signature: first 16 bytes of `HMAC-SHA256(session_key, message)`.
///
/// `message` must have the signed flag set and the signature field zeroed.
pub fn hmac_sha256(session_key: &[u8], message: &[u8]) -> [u8; SIGNATURE_SIZE] {
    let Ok(mut mac) = HmacSha256::new_from_slice(session_key) else {
        unreachable!("HMAC-SHA256 accepts any key size");
    };
    mac.update(message);
    let result = mac.finalize().into_bytes();

    let mut signature = [0u8; SIGNATURE_SIZE];
    signature.copy_from_slice(&result[..SIGNATURE_SIZE]);
    signature
}

/// SMB 3.x signature: `AES-128-CMAC(signing_key, message)`.
///
/// `message` must have the signed flag set and the signature field zeroed.
pub fn aes_cmac(signing_key: &SigningKey, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
    let Ok(mut mac) = Aes128Cmac::new_from_slice(signing_key.as_bytes()) else {
        unreachable!("derived signing keys are always 16 bytes");
    };
    mac.update(message);
    let result = mac.finalize().into_bytes();

    let mut signature = [0u8; SIGNATURE_SIZE];
    signature.copy_from_slice(&result);
    signature
}
