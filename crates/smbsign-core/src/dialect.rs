//! Negotiated SMB dialects and the signing family each belongs to.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Negotiated protocol dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dialect {
    /// SMB1 (`NT LM 0.12`); has no SMB2 dialect code
    Smb1,
    /// SMB 2.0.2
    Smb202,
    /// SMB 2.1
    Smb210,
    /// SMB 3.0
    Smb300,
    /// SMB 3.0.2
    Smb302,
    /// SMB 3.1.1
    Smb311,
}

/// Signing generation a dialect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolFamily {
    /// MD5 with sequence numbers
    Smb1,
    /// HMAC-SHA256 keyed with the session key
    Smb2,
    /// AES-CMAC keyed with a derived signing key
    Smb3,
}

impl Dialect {
    /// Every dialect, oldest first.
    pub const ALL: [Self; 6] =
        [Self::Smb1, Self::Smb202, Self::Smb210, Self::Smb300, Self::Smb302, Self::Smb311];

    /// Decode an SMB2 `DialectRevision`. `None` for wildcard or unknown codes.
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            0x0202 => Some(Self::Smb202),
            0x0210 => Some(Self::Smb210),
            0x0300 => Some(Self::Smb300),
            0x0302 => Some(Self::Smb302),
            0x0311 => Some(Self::Smb311),
            _ => None,
        }
    }

    /// SMB2 `DialectRevision` code. `None` for SMB1.
    pub fn code(self) -> Option<u16> {
        match self {
            Self::Smb1 => None,
            Self::Smb202 => Some(0x0202),
            Self::Smb210 => Some(0x0210),
            Self::Smb300 => Some(0x0300),
            Self::Smb302 => Some(0x0302),
            Self::Smb311 => Some(0x0311),
        }
    }

    /// Signing family for this dialect.
    pub fn family(self) -> ProtocolFamily {
        match self {
            Self::Smb1 => ProtocolFamily::Smb1,
            Self::Smb202 | Self::Smb210 => ProtocolFamily::Smb2,
            Self::Smb300 | Self::Smb302 | Self::Smb311 => ProtocolFamily::Smb3,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{code:#06x}"),
            None => f.write_str("SMB1"),
        }
    }
}

/// Unrecognized dialect string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized dialect {0:?}")]
pub struct DialectParseError(pub String);

impl FromStr for Dialect {
    type Err = DialectParseError;

    /// Accepts `SMB1`, hex revision codes (`0x0311`) and dotted versions
    /// (`3.1.1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let dialect = match normalized.as_str() {
            "smb1" | "nt lm 0.12" => Some(Self::Smb1),
            "2.0.2" => Some(Self::Smb202),
            "2.1" | "2.1.0" => Some(Self::Smb210),
            "3.0" | "3.0.0" => Some(Self::Smb300),
            "3.0.2" => Some(Self::Smb302),
            "3.1.1" => Some(Self::Smb311),
            other => other
                .strip_prefix("0x")
                .and_then(|hex| u16::from_str_radix(hex, 16).ok())
                .and_then(Self::from_u16),
        };
        dialect.ok_or_else(|| DialectParseError(s.to_string()))
    }
}
