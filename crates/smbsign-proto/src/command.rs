//! SMB2 command codes and header flags.

use std::fmt;

/// SMB2/3 command codes (MS-SMB2 2.2.1).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Dialect negotiation
    Negotiate = 0x0000,
    /// Session setup (authentication)
    SessionSetup = 0x0001,
    /// Session teardown
    Logoff = 0x0002,
    /// Connect to a share; binds the tree to the session
    TreeConnect = 0x0003,
    /// Disconnect from a share
    TreeDisconnect = 0x0004,
    /// Open or create a file
    Create = 0x0005,
    /// Close a file handle
    Close = 0x0006,
    /// Flush cached data
    Flush = 0x0007,
    /// Read from a file
    Read = 0x0008,
    /// Write to a file
    Write = 0x0009,
    /// Byte-range locking
    Lock = 0x000A,
    /// Device/filesystem control
    Ioctl = 0x000B,
    /// Cancel a pending request
    Cancel = 0x000C,
    /// Keepalive
    Echo = 0x000D,
    /// Directory enumeration
    QueryDirectory = 0x000E,
    /// Directory change notification
    ChangeNotify = 0x000F,
    /// Query file/filesystem/security info
    QueryInfo = 0x0010,
    /// Set file/filesystem/security info
    SetInfo = 0x0011,
    /// Oplock or lease break acknowledgement
    OplockBreak = 0x0012,
}

impl Command {
    /// Decode a raw command code. `None` if unrecognized.
    pub fn from_u16(value: u16) -> Option<Self> {
        let command = match value {
            0x0000 => Self::Negotiate,
            0x0001 => Self::SessionSetup,
            0x0002 => Self::Logoff,
            0x0003 => Self::TreeConnect,
            0x0004 => Self::TreeDisconnect,
            0x0005 => Self::Create,
            0x0006 => Self::Close,
            0x0007 => Self::Flush,
            0x0008 => Self::Read,
            0x0009 => Self::Write,
            0x000A => Self::Lock,
            0x000B => Self::Ioctl,
            0x000C => Self::Cancel,
            0x000D => Self::Echo,
            0x000E => Self::QueryDirectory,
            0x000F => Self::ChangeNotify,
            0x0010 => Self::QueryInfo,
            0x0011 => Self::SetInfo,
            0x0012 => Self::OplockBreak,
            _ => return None,
        };
        Some(command)
    }

    /// Raw command code.
    pub fn to_u16(self) -> u16 {
        self as u16
    }
}

/// SMB2 header `Flags` bitfield.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HeaderFlags(u32);

impl HeaderFlags {
    /// Message is a response (server to client)
    pub const SERVER_TO_REDIR: u32 = 0x0000_0001;
    /// Header carries an `AsyncId` instead of `TreeId`
    pub const ASYNC_COMMAND: u32 = 0x0000_0002;
    /// Part of a related compound chain
    pub const RELATED_OPERATIONS: u32 = 0x0000_0004;
    /// Message is signed
    pub const SIGNED: u32 = 0x0000_0008;
    /// DFS operation
    pub const DFS_OPERATIONS: u32 = 0x1000_0000;
    /// Replayed operation (3.x)
    pub const REPLAY_OPERATION: u32 = 0x2000_0000;

    /// Empty flag set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Build from raw wire bits (unknown bits are preserved).
    pub fn from_u32(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw wire bits.
    pub fn to_u32(self) -> u32 {
        self.0
    }

    /// True if every bit of `flag` is set.
    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }

    /// Set the bits of `flag`.
    pub fn insert(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clear the bits of `flag`.
    pub fn remove(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Response flag.
    pub fn is_response(self) -> bool {
        self.contains(Self::SERVER_TO_REDIR)
    }

    /// Async flag.
    pub fn is_async(self) -> bool {
        self.contains(Self::ASYNC_COMMAND)
    }

    /// Signed flag.
    pub fn is_signed(self) -> bool {
        self.contains(Self::SIGNED)
    }
}

impl fmt::Debug for HeaderFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderFlags")
            .field("bits", &format_args!("{:#010x}", self.0))
            .field("response", &self.is_response())
            .field("async", &self.is_async())
            .field("signed", &self.is_signed())
            .finish()
    }
}
