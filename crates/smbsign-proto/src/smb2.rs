//! SMB2/3 header with zero-copy parsing.
//!
//! The `Smb2Header` is the fixed 64-byte structure that prefixes every SMB2
//! and SMB3 message (MS-SMB2 2.2.1). Signing covers the whole message with
//! the 16-byte signature field zeroed, so the signature is the only field
//! that lives outside the authenticated bytes.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    Command, HeaderFlags,
    errors::{ProtocolError, Result},
};

/// Fixed 64-byte SMB2/3 header (little-endian).
///
/// Fields are stored as raw byte arrays so every 64-byte pattern is a valid
/// value and the struct can be cast from untrusted network bytes.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct Smb2Header {
    // Protocol identification (bytes 0-7)
    protocol_id: [u8; 4],    // FE 'S' 'M' 'B'
    structure_size: [u8; 2], // always 64
    credit_charge: [u8; 2],

    // Status and command (bytes 8-15)
    status: [u8; 4], // NTSTATUS in responses, channel sequence in 3.x requests
    command: [u8; 2],
    credit: [u8; 2], // CreditRequest / CreditResponse

    // Processing (bytes 16-31)
    flags: [u8; 4],
    next_command: [u8; 4],
    message_id: [u8; 8],

    // Routing (bytes 32-47)
    // Flag-dependent field:
    //   - sync messages: Reserved (4 bytes) + TreeId (4 bytes)
    //   - ASYNC_COMMAND messages: AsyncId (8 bytes)
    async_or_tree: [u8; 8],
    session_id: [u8; 8],

    // Authentication (bytes 48-63)
    signature: [u8; 16],
}

impl Smb2Header {
    /// Size of the serialized header.
    pub const SIZE: usize = 64;

    /// Protocol identifier `0xFE 'S' 'M' 'B'`.
    pub const PROTOCOL_ID: [u8; 4] = [0xFE, b'S', b'M', b'B'];

    /// Value of the `StructureSize` field.
    pub const STRUCTURE_SIZE: u16 = 64;

    /// Length of the signature field.
    pub const SIGNATURE_SIZE: usize = 16;

    /// Byte range of the signature within the header.
    pub const SIGNATURE_RANGE: std::ops::Range<usize> = 48..64;

    /// Create a zeroed request header for `command`.
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self {
            protocol_id: Self::PROTOCOL_ID,
            structure_size: Self::STRUCTURE_SIZE.to_le_bytes(),
            credit_charge: [0; 2],
            status: [0; 4],
            command: command.to_u16().to_le_bytes(),
            credit: [0; 2],
            flags: [0; 4],
            next_command: [0; 4],
            message_id: [0; 8],
            async_or_tree: [0; 8],
            session_id: [0; 8],
            signature: [0; 16],
        }
    }

    /// Parse header from network bytes (zero-copy).
    ///
    /// Trailing bytes after the first 64 are ignored.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::PacketTooShort` if fewer than 64 bytes are given
    /// - `ProtocolError::InvalidProtocolId` if the magic is not `FE 'S' 'M' 'B'`
    /// - `ProtocolError::InvalidStructureSize` if `StructureSize` is not 64
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        let header = Self::ref_from_prefix(bytes)
            .map_err(|_| ProtocolError::PacketTooShort {
                expected: Self::SIZE,
                actual: bytes.len(),
            })?
            .0;

        if header.protocol_id != Self::PROTOCOL_ID {
            return Err(ProtocolError::InvalidProtocolId(header.protocol_id));
        }

        let structure_size = u16::from_le_bytes(header.structure_size);
        if structure_size != Self::STRUCTURE_SIZE {
            return Err(ProtocolError::InvalidStructureSize(structure_size));
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

    /// Credits consumed by this request.
    #[must_use]
    pub fn credit_charge(&self) -> u16 {
        u16::from_le_bytes(self.credit_charge)
    }

    /// Raw status / channel sequence field.
    #[must_use]
    pub fn status(&self) -> u32 {
        u32::from_le_bytes(self.status)
    }

    /// Command code as raw u16.
    #[must_use]
    pub fn command(&self) -> u16 {
        u16::from_le_bytes(self.command)
    }

    /// Command code as enum. `None` if unrecognized.
    #[must_use]
    pub fn command_enum(&self) -> Option<Command> {
        Command::from_u16(self.command())
    }

    /// Credits requested (request) or granted (response).
    #[must_use]
    pub fn credit(&self) -> u16 {
        u16::from_le_bytes(self.credit)
    }

    /// Header flags.
    #[must_use]
    pub fn flags(&self) -> HeaderFlags {
        HeaderFlags::from_u32(u32::from_le_bytes(self.flags))
    }

    /// Offset of the next command in a compound chain, 0 if last.
    #[must_use]
    pub fn next_command(&self) -> u32 {
        u32::from_le_bytes(self.next_command)
    }

    /// Message identifier.
    #[must_use]
    pub fn message_id(&self) -> u64 {
        u64::from_le_bytes(self.message_id)
    }

    /// Tree identifier.
    ///
    /// Only meaningful for sync messages. For async messages, use
    /// [`Self::async_id()`] instead.
    #[must_use]
    pub fn tree_id(&self) -> u32 {
        debug_assert!(
            !self.flags().is_async(),
            "tree_id() called on async header - use async_id() instead"
        );
        u32::from_le_bytes([
            self.async_or_tree[4],
            self.async_or_tree[5],
            self.async_or_tree[6],
            self.async_or_tree[7],
        ])
    }

    /// Async identifier.
    ///
    /// Only meaningful when `ASYNC_COMMAND` is set.
    #[must_use]
    pub fn async_id(&self) -> u64 {
        debug_assert!(
            self.flags().is_async(),
            "async_id() called on sync header - use tree_id() instead"
        );
        u64::from_le_bytes(self.async_or_tree)
    }

    /// Session identifier.
    #[must_use]
    pub fn session_id(&self) -> u64 {
        u64::from_le_bytes(self.session_id)
    }

    /// 16-byte message signature.
    #[must_use]
    pub fn signature(&self) -> &[u8; 16] {
        &self.signature
    }

    /// True if the `SIGNED` flag is set.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.flags().is_signed()
    }

    /// True for a client-originated `TREE_CONNECT`.
    #[must_use]
    pub fn is_tree_connect_request(&self) -> bool {
        self.command_enum() == Some(Command::TreeConnect) && !self.flags().is_response()
    }

    /// Set credits consumed by this request.
    pub fn set_credit_charge(&mut self, charge: u16) {
        self.credit_charge = charge.to_le_bytes();
    }

    /// Set status / channel sequence field.
    pub fn set_status(&mut self, status: u32) {
        self.status = status.to_le_bytes();
    }

    /// Set credits requested.
    pub fn set_credit(&mut self, credit: u16) {
        self.credit = credit.to_le_bytes();
    }

    /// Replace the flag set.
    pub fn set_flags(&mut self, flags: HeaderFlags) {
        self.flags = flags.to_u32().to_le_bytes();
    }

    /// Set or clear the `SIGNED` flag, leaving the other bits alone.
    pub fn set_signed(&mut self, signed: bool) {
        let mut flags = self.flags();
        if signed {
            flags.insert(HeaderFlags::SIGNED);
        } else {
            flags.remove(HeaderFlags::SIGNED);
        }
        self.set_flags(flags);
    }

    /// Set compound chain offset.
    pub fn set_next_command(&mut self, offset: u32) {
        self.next_command = offset.to_le_bytes();
    }

    /// Set message identifier.
    pub fn set_message_id(&mut self, message_id: u64) {
        self.message_id = message_id.to_le_bytes();
    }

    /// Set tree identifier (sync messages only). Clears the reserved half.
    pub fn set_tree_id(&mut self, tree_id: u32) {
        debug_assert!(
            !self.flags().is_async(),
            "set_tree_id() called on async header - use set_async_id() instead"
        );
        self.async_or_tree[..4].copy_from_slice(&[0; 4]);
        self.async_or_tree[4..].copy_from_slice(&tree_id.to_le_bytes());
    }

    /// Set async identifier (`ASYNC_COMMAND` messages only).
    pub fn set_async_id(&mut self, async_id: u64) {
        debug_assert!(
            self.flags().is_async(),
            "set_async_id() called on sync header - use set_tree_id() instead"
        );
        self.async_or_tree = async_id.to_le_bytes();
    }

    /// Set session identifier.
    pub fn set_session_id(&mut self, session_id: u64) {
        self.session_id = session_id.to_le_bytes();
    }

    /// Overwrite the signature field.
    pub fn set_signature(&mut self, signature: [u8; 16]) {
        self.signature = signature;
    }
}

// Manual Debug implementation (can't derive due to packed repr)
impl std::fmt::Debug for Smb2Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flags = self.flags();
        let (routing_label, routing_value) = if flags.is_async() {
            ("async_id", u64::from_le_bytes(self.async_or_tree))
        } else {
            ("tree_id", u64::from(self.tree_id()))
        };

        f.debug_struct("Smb2Header")
            .field("command", &format_args!("{:#06x}", self.command()))
            .field("credit_charge", &self.credit_charge())
            .field("status", &format_args!("{:#010x}", self.status()))
            .field("credit", &self.credit())
            .field("flags", &flags)
            .field("next_command", &self.next_command())
            .field("message_id", &self.message_id())
            .field(routing_label, &routing_value)
            .field("session_id", &format_args!("{:#018x}", self.session_id()))
            .finish_non_exhaustive()
    }
}

// Manual PartialEq implementation (can't derive due to packed repr)
impl PartialEq for Smb2Header {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Smb2Header {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn arbitrary_bytes<const N: usize>() -> impl Strategy<Value = [u8; N]> {
        prop::collection::vec(any::<u8>(), N).prop_map(|v| {
            let mut arr = [0u8; N];
            arr.copy_from_slice(&v);
            arr
        })
    }

    impl Arbitrary for Smb2Header {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            (
                arbitrary_bytes::<2>(),  // credit_charge
                arbitrary_bytes::<4>(),  // status
                arbitrary_bytes::<2>(),  // command
                arbitrary_bytes::<2>(),  // credit
                arbitrary_bytes::<4>(),  // flags
                arbitrary_bytes::<4>(),  // next_command
                arbitrary_bytes::<8>(),  // message_id
                arbitrary_bytes::<8>(),  // async_or_tree
                arbitrary_bytes::<8>(),  // session_id
                arbitrary_bytes::<16>(), // signature
            )
                .prop_map(
                    |(
                        credit_charge,
                        status,
                        command,
                        credit,
                        flags,
                        next_command,
                        message_id,
                        async_or_tree,
                        session_id,
                        signature,
                    )| Self {
                        protocol_id: Self::PROTOCOL_ID,
                        structure_size: Self::STRUCTURE_SIZE.to_le_bytes(),
                        credit_charge,
                        status,
                        command,
                        credit,
                        flags,
                        next_command,
                        message_id,
                        async_or_tree,
                        session_id,
                        signature,
                    },
                )
                .boxed()
        }
    }

    #[test]
    fn header_size() {
        assert_eq!(std::mem::size_of::<Smb2Header>(), Smb2Header::SIZE);
        assert_eq!(Smb2Header::SIZE, 64);
    }

    proptest! {
        #[test]
        fn header_round_trip(header in any::<Smb2Header>()) {
            let bytes = header.to_bytes();
            let parsed = Smb2Header::from_bytes(&bytes).expect("should parse");
            prop_assert_eq!(&header, parsed);
        }

        #[test]
        fn set_signed_touches_only_signed_bit(header in any::<Smb2Header>()) {
            let mut signed = header;
            signed.set_signed(true);

            let before = header.to_bytes();
            let after = signed.to_bytes();
            prop_assert!(signed.is_signed());
            for (i, (a, b)) in before.iter().zip(after.iter()).enumerate() {
                if i == 16 {
                    prop_assert_eq!(a | 0x08, *b);
                } else {
                    prop_assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn new_header_layout() {
        let mut header = Smb2Header::new(Command::Echo);
        header.set_message_id(7);
        header.set_session_id(0x0000_4000_0000_0011);
        header.set_signed(true);

        let expected = hex::decode(concat!(
            "fe534d4240000000000000000d000000",
            "08000000000000000700000000000000",
            "00000000000000001100000000400000",
            "00000000000000000000000000000000",
        ))
        .expect("valid hex");
        assert_eq!(header.to_bytes().as_slice(), expected.as_slice());
    }

    #[test]
    fn signature_occupies_last_sixteen_bytes() {
        let mut header = Smb2Header::new(Command::Read);
        header.set_signature([0xAA; 16]);

        let bytes = header.to_bytes();
        assert_eq!(&bytes[Smb2Header::SIGNATURE_RANGE], &[0xAA; 16]);
        assert!(bytes[..48].iter().skip(16).all(|&b| b == 0));
    }

    #[test]
    fn tree_connect_request_detection() {
        let request = Smb2Header::new(Command::TreeConnect);
        assert!(request.is_tree_connect_request());

        let mut response = Smb2Header::new(Command::TreeConnect);
        response.set_flags(HeaderFlags::from_u32(HeaderFlags::SERVER_TO_REDIR));
        assert!(!response.is_tree_connect_request());

        let other = Smb2Header::new(Command::Create);
        assert!(!other.is_tree_connect_request());
    }

    #[test]
    fn tree_id_and_async_id_share_storage() {
        let mut header = Smb2Header::new(Command::ChangeNotify);
        header.set_tree_id(0xDEAD_BEEF);
        assert_eq!(header.tree_id(), 0xDEAD_BEEF);

        header.set_flags(HeaderFlags::from_u32(HeaderFlags::ASYNC_COMMAND));
        header.set_async_id(0x0102_0304_0506_0708);
        assert_eq!(header.async_id(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn reject_short_buffer() {
        let result = Smb2Header::from_bytes(&[0u8; 63]);
        assert_eq!(result, Err(ProtocolError::PacketTooShort { expected: 64, actual: 63 }));
    }

    #[test]
    fn reject_invalid_protocol_id() {
        let mut buf = Smb2Header::new(Command::Echo).to_bytes();
        buf[0] = 0xFF;

        let result = Smb2Header::from_bytes(&buf);
        assert_eq!(result, Err(ProtocolError::InvalidProtocolId([0xFF, b'S', b'M', b'B'])));
    }

    #[test]
    fn reject_invalid_structure_size() {
        let mut buf = Smb2Header::new(Command::Echo).to_bytes();
        buf[4] = 65;

        let result = Smb2Header::from_bytes(&buf);
        assert_eq!(result, Err(ProtocolError::InvalidStructureSize(65)));
    }
}
