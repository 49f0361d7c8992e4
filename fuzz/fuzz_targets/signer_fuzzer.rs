//! Fuzz target for the signing entry points.
//!
//! Drives every dialect with arbitrary keys, policies and packets, checking:
//! - Signing never panics
//! - Failed or skipped calls leave the packet byte-identical
//! - Only SMB1 signing advances the sequence counter, by exactly one
//! - Signed SMB2/3 packets carry the SIGNED flag

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use smbsign_core::{Dialect, SignOutcome, SigningConfig, SigningContext, sign_smb1, sign_smb2};
use smbsign_proto::{Command, HeaderFlags, Smb1Header, Smb1Message, Smb2Header, Smb2Message};

#[derive(Debug, Arbitrary)]
struct Input {
    dialect_index: u8,
    session_key: Vec<u8>,
    preauth_hash: Option<Vec<u8>>,
    required: bool,
    cache_signing_key: bool,
    command: u16,
    flags: u32,
    body: Vec<u8>,
    rounds: u8,
}

fuzz_target!(|input: Input| {
    let dialect = Dialect::ALL[usize::from(input.dialect_index) % Dialect::ALL.len()];
    let config =
        SigningConfig { required: input.required, cache_signing_key: input.cache_signing_key };
    let mut ctx = SigningContext::from_config(input.session_key, dialect, config);
    if let Some(hash) = input.preauth_hash {
        ctx = ctx.with_preauth_integrity_hash(hash);
    }

    for _ in 0..(input.rounds % 4) {
        let counter = ctx.sequence_counter();

        let mut smb1 = Smb1Message::new(Smb1Header::new(input.command as u8), input.body.clone());
        let before = smb1.to_vec();
        match sign_smb1(&mut smb1, &mut ctx) {
            SignOutcome::Signed => assert_eq!(ctx.sequence_counter(), counter.wrapping_add(1)),
            SignOutcome::Skipped => {
                assert_eq!(smb1.to_vec(), before);
                assert_eq!(ctx.sequence_counter(), counter);
            },
        }

        let counter = ctx.sequence_counter();
        let Some(command) = Command::from_u16(input.command) else { continue };
        let mut header = Smb2Header::new(command);
        header.set_flags(HeaderFlags::from_u32(input.flags));
        let mut smb2 = Smb2Message::new(header, input.body.clone());
        let before = smb2.to_vec();
        match sign_smb2(&mut smb2, &mut ctx) {
            Ok(SignOutcome::Signed) => assert!(smb2.header.is_signed()),
            Ok(SignOutcome::Skipped) | Err(_) => assert_eq!(smb2.to_vec(), before),
        }
        assert_eq!(ctx.sequence_counter(), counter);
    }
});
