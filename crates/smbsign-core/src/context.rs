//! Per-session signing state.

use std::fmt;

use smbsign_crypto::{SessionKey, SigningKey};

use crate::{Dialect, SigningConfig};

/// Everything a signer needs to know about the session.
///
/// Built once authentication completes. The session key, dialect and preauth
/// integrity hash are fixed at construction; the sequence counter starts at
/// zero and only SMB1 signing advances it.
///
/// Not `Clone`: two copies of a context would hand out the same sequence
/// numbers. Share one through [`crate::SharedSigningContext`] instead.
pub struct SigningContext {
    session_key: SessionKey,
    sequence_counter: u64,
    dialect: Dialect,
    preauth_integrity_hash: Option<Vec<u8>>,
    config: SigningConfig,
    /// Derived SMB3 signing key, filled on first use when caching is enabled
    signing_key: Option<SigningKey>,
}

impl SigningContext {
    /// Create a context with the default policy and an explicit
    /// `signing_required` flag.
    pub fn new(
        session_key: impl Into<SessionKey>,
        dialect: Dialect,
        signing_required: bool,
    ) -> Self {
        Self::from_config(
            session_key,
            dialect,
            SigningConfig { required: signing_required, ..SigningConfig::default() },
        )
    }

    /// Create a context from a full signing policy.
    pub fn from_config(
        session_key: impl Into<SessionKey>,
        dialect: Dialect,
        config: SigningConfig,
    ) -> Self {
        Self {
            session_key: session_key.into(),
            sequence_counter: 0,
            dialect,
            preauth_integrity_hash: None,
            config,
            signing_key: None,
        }
    }

    /// Attach the SMB 3.1.1 preauth integrity hash from negotiation.
    #[must_use]
    pub fn with_preauth_integrity_hash(mut self, hash: impl Into<Vec<u8>>) -> Self {
        self.preauth_integrity_hash = Some(hash.into());
        self.signing_key = None;
        self
    }

    /// Session key from authentication.
    pub fn session_key(&self) -> &SessionKey {
        &self.session_key
    }

    /// Sequence number the next signed SMB1 message will carry.
    pub fn sequence_counter(&self) -> u64 {
        self.sequence_counter
    }

    /// Whether the session requires every message to be signed.
    pub fn signing_required(&self) -> bool {
        self.config.required
    }

    /// Negotiated dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// SMB 3.1.1 preauth integrity hash, if negotiation produced one.
    pub fn preauth_integrity_hash(&self) -> Option<&[u8]> {
        self.preauth_integrity_hash.as_deref()
    }

    /// Signing policy.
    pub fn config(&self) -> &SigningConfig {
        &self.config
    }

    /// Advance the sequence counter, returning the value to embed.
    pub(crate) fn next_sequence_number(&mut self) -> u64 {
        let current = self.sequence_counter;
        self.sequence_counter = self.sequence_counter.wrapping_add(1);
        current
    }

    pub(crate) fn cached_signing_key(&self) -> Option<&SigningKey> {
        self.signing_key.as_ref()
    }

    /// Remember a derived key if the policy allows caching.
    pub(crate) fn store_signing_key(&mut self, key: &SigningKey) {
        if self.config.cache_signing_key {
            self.signing_key = Some(key.clone());
        }
    }
}

// Manual Debug implementation (never prints key material)
impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("session_key", &self.session_key)
            .field("sequence_counter", &self.sequence_counter)
            .field("signing_required", &self.config.required)
            .field("dialect", &self.dialect)
            .field(
                "preauth_integrity_hash_len",
                &self.preauth_integrity_hash.as_ref().map(Vec::len),
            )
            .field("signing_key_cached", &self.signing_key.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_starts_at_zero() {
        let ctx = SigningContext::new(vec![1u8; 16], Dialect::Smb1, true);
        assert_eq!(ctx.sequence_counter(), 0);
        assert!(ctx.signing_required());
        assert_eq!(ctx.preauth_integrity_hash(), None);
    }

    #[test]
    fn next_sequence_number_returns_then_advances() {
        let mut ctx = SigningContext::new(vec![1u8; 16], Dialect::Smb1, true);
        assert_eq!(ctx.next_sequence_number(), 0);
        assert_eq!(ctx.next_sequence_number(), 1);
        assert_eq!(ctx.sequence_counter(), 2);
    }

    #[test]
    fn store_respects_cache_policy() {
        let key = SigningKey::from_bytes([7; 16]);

        let mut caching = SigningContext::new(vec![1u8; 16], Dialect::Smb300, true);
        caching.store_signing_key(&key);
        assert_eq!(caching.cached_signing_key(), Some(&key));

        let config = SigningConfig { required: true, cache_signing_key: false };
        let mut uncached = SigningContext::from_config(vec![1u8; 16], Dialect::Smb300, config);
        uncached.store_signing_key(&key);
        assert_eq!(uncached.cached_signing_key(), None);
    }

    #[test]
    fn debug_redacts_keys() {
        let ctx = SigningContext::new(vec![0x5A; 16], Dialect::Smb311, true)
            .with_preauth_integrity_hash(vec![0; 64]);
        insta::assert_snapshot!(
            format!("{ctx:?}"),
            @"SigningContext { session_key: SessionKey { len: 16, .. }, sequence_counter: 0, signing_required: true, dialect: Smb311, preauth_integrity_hash_len: Some(64), signing_key_cached: false }"
        );
    }
}
