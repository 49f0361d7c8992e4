//! Header capabilities the signers need from a message.
//!
//! Signers only touch the fields named here and never copy the body except
//! through [`Smb1Packet::to_bytes`] / [`Smb2Packet::to_bytes`].

use smbsign_proto::{Smb1Message, Smb2Message};

/// An SMB1 message with an 8-byte `SecurityFeatures` field.
pub trait Smb1Packet {
    /// Overwrite `SecurityFeatures`.
    fn set_security_features(&mut self, value: [u8; 8]);

    /// Serialize the complete message as sent on the wire.
    fn to_bytes(&self) -> Vec<u8>;
}

/// An SMB2/3 message with a signed flag and a 16-byte signature field.
pub trait Smb2Packet {
    /// Set the `SIGNED` header flag.
    fn set_signed(&mut self);

    /// Overwrite the signature field.
    fn set_signature(&mut self, signature: [u8; 16]);

    /// True for a client `TREE_CONNECT` request, which SMB3 always signs.
    fn is_tree_connect_request(&self) -> bool;

    /// Serialize the complete message as sent on the wire.
    fn to_bytes(&self) -> Vec<u8>;
}

impl Smb1Packet for Smb1Message {
    fn set_security_features(&mut self, value: [u8; 8]) {
        self.header.set_security_features(value);
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }
}

impl Smb2Packet for Smb2Message {
    fn set_signed(&mut self) {
        self.header.set_signed(true);
    }

    fn set_signature(&mut self, signature: [u8; 16]) {
        self.header.set_signature(signature);
    }

    fn is_tree_connect_request(&self) -> bool {
        self.header.is_tree_connect_request()
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }
}
