//! Tests for signing through a context shared between threads.
//!
//! These tests verify that concurrent SMB1 senders never observe the same
//! sequence number and never skip one.

use std::{collections::BTreeSet, thread};

use smbsign_core::{Dialect, SharedSigningContext, SignOutcome, SigningContext};
use smbsign_crypto::legacy_md5;
use smbsign_proto::{Command, Smb1Header, Smb1Message, Smb2Header, Smb2Message};

const THREADS: u64 = 8;
const MESSAGES_PER_THREAD: u64 = 64;

fn session_key() -> Vec<u8> {
    b"shared session key".to_vec()
}

fn echo(mid: u16) -> Smb1Message {
    let mut header = Smb1Header::new(0x2B);
    header.set_mid(mid);
    Smb1Message::new(header, vec![0x00, 0x00])
}

/// Recover the sequence number a signed message was signed with.
fn sequence_number_of(signed: &Smb1Message, max: u64) -> Option<u64> {
    let mid = signed.header.mid();
    (0..max).find(|&candidate| {
        let mut reference = echo(mid);
        reference.header.set_security_features(candidate.to_le_bytes());
        &legacy_md5(&session_key(), &reference.to_vec()) == signed.header.security_features()
    })
}

/// INVARIANT: N concurrent signed messages use sequence numbers 0..N exactly
/// once each.
#[test]
fn concurrent_smb1_signing_is_gap_free() {
    let shared = SharedSigningContext::new(SigningContext::new(session_key(), Dialect::Smb1, true));
    let total = THREADS * MESSAGES_PER_THREAD;

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_index| {
            let shared = shared.clone();
            thread::spawn(move || {
                (0..MESSAGES_PER_THREAD)
                    .map(|i| {
                        let mut message = echo((thread_index * MESSAGES_PER_THREAD + i) as u16);
                        assert_eq!(shared.sign_smb1(&mut message), SignOutcome::Signed);
                        message
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let signed: Vec<Smb1Message> =
        handles.into_iter().flat_map(|h| h.join().expect("signer thread panicked")).collect();

    assert_eq!(shared.sequence_counter(), total);

    let numbers: BTreeSet<u64> = signed
        .iter()
        .map(|message| sequence_number_of(message, total).expect("signed with a known number"))
        .collect();
    assert_eq!(numbers.len() as u64, total, "no sequence number may be reused");
    assert_eq!(numbers, (0..total).collect::<BTreeSet<_>>());
}

/// INVARIANT: SMB2/3 signing through a shared context never advances the
/// counter, even when interleaved with SMB1 traffic.
#[test]
fn smb2_signing_leaves_counter_alone() {
    let shared = SharedSigningContext::new(
        SigningContext::new(session_key(), Dialect::Smb311, true)
            .with_preauth_integrity_hash(vec![0x33; 64]),
    );

    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut header = Smb2Header::new(Command::Read);
                header.set_message_id(i);
                let mut message = Smb2Message::new(header, vec![0x31, 0x00]);
                shared.sign_smb2(&mut message)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("signer thread panicked"), Ok(SignOutcome::Signed));
    }
    assert_eq!(shared.sequence_counter(), 0);
}
