//! Fuzz target for SMB1 and SMB2 message decoding.
//!
//! Decoding arbitrary bytes must never panic. Anything that decodes must
//! re-encode to the exact input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use smbsign_proto::{Smb1Message, Smb2Message};

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = Smb1Message::decode(data) {
        assert_eq!(message.to_vec(), data);
    }
    if let Ok(message) = Smb2Message::decode(data) {
        assert_eq!(message.to_vec(), data);
    }
});
