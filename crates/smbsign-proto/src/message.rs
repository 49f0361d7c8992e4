//! Message type combining a fixed header and an opaque command body.
//!
//! These are pure data holders. The body is kept as raw bytes; the signing
//! core only needs the serialized message and access to a few header fields.

use bytes::{BufMut, Bytes};

use crate::{Smb1Header, Smb2Header, errors::Result};

/// SMB1 message: `[Smb1Header: 32 bytes] + [parameter/data blocks]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Smb1Message {
    /// Fixed header
    pub header: Smb1Header,

    /// Word count, parameter words, byte count and data (already encoded)
    pub body: Bytes,
}

impl Smb1Message {
    /// Create a message from a header and encoded body.
    #[must_use]
    pub fn new(header: Smb1Header, body: impl Into<Bytes>) -> Self {
        Self { header, body: body.into() }
    }

    /// Total encoded length.
    #[must_use]
    pub fn len(&self) -> usize {
        Smb1Header::SIZE + self.body.len()
    }

    /// Always false: a message carries at least its header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Encode message into buffer.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_slice(&self.header.to_bytes());
        dst.put_slice(&self.body);
    }

    /// Encode message into a fresh vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len());
        self.encode(&mut buf);
        buf
    }

    /// Decode message from wire bytes. Everything after the header is body.
    ///
    /// # Errors
    ///
    /// Propagates header validation errors from [`Smb1Header::from_bytes`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let header = *Smb1Header::from_bytes(bytes)?;
        let body = Bytes::copy_from_slice(bytes.get(Smb1Header::SIZE..).unwrap_or_default());
        Ok(Self { header, body })
    }
}

/// SMB2/3 message: `[Smb2Header: 64 bytes] + [command structure + buffer]`.
///
/// Compound chains are represented as separate messages; each carries its
/// own signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Smb2Message {
    /// Fixed header
    pub header: Smb2Header,

    /// Command structure and variable buffer (already encoded)
    pub body: Bytes,
}

impl Smb2Message {
    /// Create a message from a header and encoded body.
    #[must_use]
    pub fn new(header: Smb2Header, body: impl Into<Bytes>) -> Self {
        Self { header, body: body.into() }
    }

    /// Total encoded length.
    #[must_use]
    pub fn len(&self) -> usize {
        Smb2Header::SIZE + self.body.len()
    }

    /// Always false: a message carries at least its header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Encode message into buffer.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_slice(&self.header.to_bytes());
        dst.put_slice(&self.body);
    }

    /// Encode message into a fresh vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len());
        self.encode(&mut buf);
        buf
    }

    /// Decode message from wire bytes. Everything after the header is body.
    ///
    /// # Errors
    ///
    /// Propagates header validation errors from [`Smb2Header::from_bytes`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let header = *Smb2Header::from_bytes(bytes)?;
        let body = Bytes::copy_from_slice(bytes.get(Smb2Header::SIZE..).unwrap_or_default());
        Ok(Self { header, body })
    }
}
