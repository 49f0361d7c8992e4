//! Session and signing key containers.

use std::fmt;

use zeroize::Zeroize;

/// Raw session key produced by authentication (NTLM or Kerberos).
///
/// May be empty before authentication completes; an empty key means
/// "do not sign".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionKey {
    bytes: Vec<u8>,
}

impl SessionKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    /// Key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True before authentication has supplied a key.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<&[u8]> for SessionKey {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for SessionKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKey").field("len", &self.bytes.len()).finish_non_exhaustive()
    }
}

// Implement Drop to zeroize key material
impl Drop for SessionKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// 128-bit key derived for AES-CMAC signing.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    key: [u8; 16],
}

impl SigningKey {
    /// Derived key length in bytes.
    pub const SIZE: usize = 16;

    /// Wrap derived key bytes.
    pub fn from_bytes(key: [u8; Self::SIZE]) -> Self {
        Self { key }
    }

    /// Key bytes.
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.key
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_key_bytes() {
        let session = SessionKey::new(vec![0x41; 16]);
        let signing = SigningKey::from_bytes([0x42; 16]);

        assert_eq!(format!("{session:?}"), "SessionKey { len: 16, .. }");
        assert_eq!(format!("{signing:?}"), "SigningKey(..)");
    }

    #[test]
    fn empty_session_key() {
        assert!(SessionKey::default().is_empty());
        assert!(SessionKey::from(&[0u8; 0][..]).is_empty());
        assert!(!SessionKey::from(vec![1]).is_empty());
    }
}
