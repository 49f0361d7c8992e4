//! Tests for the packet signing front end.

use proptest::prelude::*;
use smbsign_cli::{CliError, SignRequest, sign_packet};
use smbsign_core::{Dialect, SignOutcome, SigningConfig};

const SMB2_ECHO: &str = concat!(
    "fe534d4240000000000000000d00000000000000000000000700000000000000",
    "0000000000000000110000000040000000000000000000000000000000000000",
    "04000000",
);

const SMB1_ECHO: &str = concat!(
    "ff534d422b000000001807c8000000000000000000000000",
    "ffffefbe00080300",
    "0000",
);

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("valid hex")
}

fn request(dialect: Dialect, required: bool) -> SignRequest {
    SignRequest {
        dialect,
        session_key: (0u8..16).collect(),
        preauth_hash: Some(vec![0xAB; 64]),
        config: SigningConfig { required, ..SigningConfig::default() },
    }
}

#[test]
fn signs_smb2_with_cmac() {
    let signed = sign_packet(&request(Dialect::Smb311, true), &unhex(SMB2_ECHO)).expect("sign");

    assert_eq!(signed.outcome, SignOutcome::Signed);
    assert_eq!(hex::encode(&signed.bytes[48..64]), "d37a11948f30ec27c12850b35cb8328d");
}

#[test]
fn signs_smb2_with_hmac() {
    let signed = sign_packet(&request(Dialect::Smb210, true), &unhex(SMB2_ECHO)).expect("sign");

    assert_eq!(hex::encode(&signed.bytes[48..64]), "d188234264f557d791f22e4dbae84afd");
}

#[test]
fn signs_smb1_with_md5() {
    let signed = sign_packet(&request(Dialect::Smb1, true), &unhex(SMB1_ECHO)).expect("sign");

    assert_eq!(signed.outcome, SignOutcome::Signed);
    assert_eq!(hex::encode(&signed.bytes[14..22]), "5f3ad0e1f01c764b");
}

#[test]
fn unsigned_when_not_required() {
    let packet = unhex(SMB2_ECHO);
    let signed = sign_packet(&request(Dialect::Smb300, false), &packet).expect("sign");

    assert_eq!(signed.outcome, SignOutcome::Skipped);
    assert_eq!(signed.bytes, packet);
}

#[test]
fn rejects_family_mismatch() {
    let result = sign_packet(&request(Dialect::Smb311, true), &unhex(SMB1_ECHO));
    assert!(matches!(result, Err(CliError::FamilyMismatch { framing: "SMB1", .. })));

    let result = sign_packet(&request(Dialect::Smb1, true), &unhex(SMB2_ECHO));
    assert!(matches!(result, Err(CliError::FamilyMismatch { framing: "SMB2", .. })));
}

#[test]
fn rejects_unknown_magic() {
    let result = sign_packet(&request(Dialect::Smb311, true), b"\x00SMB rest of packet");
    assert!(matches!(result, Err(CliError::UnknownProtocol([0x00, b'S', b'M', b'B']))));
}

#[test]
fn missing_preauth_hash_is_reported() {
    let mut req = request(Dialect::Smb311, true);
    req.preauth_hash = None;

    let result = sign_packet(&req, &unhex(SMB2_ECHO));
    assert!(matches!(result, Err(CliError::Signing(_))));
}

proptest! {
    #[test]
    fn arbitrary_input_never_panics(
        bytes in prop::collection::vec(any::<u8>(), 0..256),
        dialect in prop::sample::select(Dialect::ALL.to_vec())
    ) {
        let _ = sign_packet(&request(dialect, true), &bytes);
    }
}
