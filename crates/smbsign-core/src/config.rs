//! Client signing policy.

use serde::{Deserialize, Serialize};

/// Signing policy for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Sign every message once a session key exists. When false, only SMB3
    /// tree connect requests are signed.
    pub required: bool,
    /// Keep the derived SMB3 signing key for the life of the context instead
    /// of re-deriving it per message.
    pub cache_signing_key: bool,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self { required: false, cache_signing_key: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SigningConfig::default();
        assert!(!config.required);
        assert!(config.cache_signing_key);
    }

    #[test]
    fn cbor_round_trip() {
        let config = SigningConfig { required: true, cache_signing_key: false };

        let mut buf = Vec::new();
        ciborium::into_writer(&config, &mut buf).expect("serialize");
        let decoded: SigningConfig = ciborium::from_reader(buf.as_slice()).expect("deserialize");

        assert_eq!(decoded, config);
    }
}
