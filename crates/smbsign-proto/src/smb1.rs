//! SMB1 header with zero-copy parsing.
//!
//! The 32-byte SMB1 header carries an 8-byte `SecurityFeatures` field that
//! holds the sequence number while the signature is computed, and the
//! truncated MD5 signature afterwards.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::errors::{ProtocolError, Result};

/// Fixed 32-byte SMB1 header (little-endian).
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct Smb1Header {
    protocol: [u8; 4], // FF 'S' 'M' 'B'
    command: u8,
    status: [u8; 4],
    flags: u8,
    flags2: [u8; 2],
    pid_high: [u8; 2],
    security_features: [u8; 8], // sequence number / signature
    reserved: [u8; 2],
    tid: [u8; 2],
    pid_low: [u8; 2],
    uid: [u8; 2],
    mid: [u8; 2],
}

impl Smb1Header {
    /// Size of the serialized header.
    pub const SIZE: usize = 32;

    /// Protocol identifier `0xFF 'S' 'M' 'B'`.
    pub const PROTOCOL_ID: [u8; 4] = [0xFF, b'S', b'M', b'B'];

    /// Byte range of `SecurityFeatures` within the header.
    pub const SECURITY_FEATURES_RANGE: std::ops::Range<usize> = 14..22;

    /// Create a zeroed header for `command`.
    #[must_use]
    pub fn new(command: u8) -> Self {
        Self {
            protocol: Self::PROTOCOL_ID,
            command,
            status: [0; 4],
            flags: 0,
            flags2: [0; 2],
            pid_high: [0; 2],
            security_features: [0; 8],
            reserved: [0; 2],
            tid: [0; 2],
            pid_low: [0; 2],
            uid: [0; 2],
            mid: [0; 2],
        }
    }

    /// Parse header from network bytes (zero-copy).
    ///
    /// # Errors
    ///
    /// - `ProtocolError::PacketTooShort` if fewer than 32 bytes are given
    /// - `ProtocolError::InvalidProtocolId` if the magic is not `FF 'S' 'M' 'B'`
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        let header = Self::ref_from_prefix(bytes)
            .map_err(|_| ProtocolError::PacketTooShort {
                expected: Self::SIZE,
                actual: bytes.len(),
            })?
            .0;

        if header.protocol != Self::PROTOCOL_ID {
            return Err(ProtocolError::InvalidProtocolId(header.protocol));
        }

        Ok(header)
    }

    /// Serialize header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut arr = [0u8; Self::SIZE];
        arr.copy_from_slice(IntoBytes::as_bytes(self));
        arr
    }

    /// Command code.
    #[must_use]
    pub fn command(&self) -> u8 {
        self.command
    }

    /// NT status.
    #[must_use]
    pub fn status(&self) -> u32 {
        u32::from_le_bytes(self.status)
    }

    /// `Flags` byte.
    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// `Flags2` word.
    #[must_use]
    pub fn flags2(&self) -> u16 {
        u16::from_le_bytes(self.flags2)
    }

    /// 32-bit process id assembled from `PIDHigh` and `PIDLow`.
    #[must_use]
    pub fn pid(&self) -> u32 {
        (u32::from(u16::from_le_bytes(self.pid_high)) << 16)
            | u32::from(u16::from_le_bytes(self.pid_low))
    }

    /// Raw `SecurityFeatures` field.
    #[must_use]
    pub fn security_features(&self) -> &[u8; 8] {
        &self.security_features
    }

    /// Tree identifier.
    #[must_use]
    pub fn tid(&self) -> u16 {
        u16::from_le_bytes(self.tid)
    }

    /// User identifier.
    #[must_use]
    pub fn uid(&self) -> u16 {
        u16::from_le_bytes(self.uid)
    }

    /// Multiplex identifier.
    #[must_use]
    pub fn mid(&self) -> u16 {
        u16::from_le_bytes(self.mid)
    }

    /// Set NT status.
    pub fn set_status(&mut self, status: u32) {
        self.status = status.to_le_bytes();
    }

    /// Set `Flags` byte.
    pub fn set_flags(&mut self, flags: u8) {
        self.flags = flags;
    }

    /// Set `Flags2` word.
    pub fn set_flags2(&mut self, flags2: u16) {
        self.flags2 = flags2.to_le_bytes();
    }

    /// Split a 32-bit process id into `PIDHigh` and `PIDLow`.
    pub fn set_pid(&mut self, pid: u32) {
        self.pid_high = ((pid >> 16) as u16).to_le_bytes();
        self.pid_low = (pid as u16).to_le_bytes();
    }

    /// Overwrite `SecurityFeatures`.
    pub fn set_security_features(&mut self, value: [u8; 8]) {
        self.security_features = value;
    }

    /// Set tree identifier.
    pub fn set_tid(&mut self, tid: u16) {
        self.tid = tid.to_le_bytes();
    }

    /// Set user identifier.
    pub fn set_uid(&mut self, uid: u16) {
        self.uid = uid.to_le_bytes();
    }

    /// Set multiplex identifier.
    pub fn set_mid(&mut self, mid: u16) {
        self.mid = mid.to_le_bytes();
    }
}

// Manual Debug implementation (can't derive due to packed repr)
impl std::fmt::Debug for Smb1Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Smb1Header")
            .field("command", &format_args!("{:#04x}", self.command))
            .field("status", &format_args!("{:#010x}", self.status()))
            .field("flags", &format_args!("{:#04x}", self.flags))
            .field("flags2", &format_args!("{:#06x}", self.flags2()))
            .field("pid", &self.pid())
            .field("tid", &self.tid())
            .field("uid", &self.uid())
            .field("mid", &self.mid())
            .finish_non_exhaustive()
    }
}

// Manual PartialEq implementation (can't derive due to packed repr)
impl PartialEq for Smb1Header {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Smb1Header {}
