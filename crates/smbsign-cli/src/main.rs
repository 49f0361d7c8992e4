//! `smbsign` binary.
//!
//! # Usage
//!
//! ```bash
//! # Sign an SMB 3.1.1 request
//! smbsign --dialect 3.1.1 --session-key 000102...0f \
//!     --preauth-hash abab...ab --required fe534d42...
//!
//! # Legacy SMB1 signing
//! smbsign --dialect smb1 --session-key 000102...0f --required ff534d42...
//! ```

use std::io::Write;

use clap::Parser;
use smbsign_cli::{CliError, SignRequest, sign_packet};
use smbsign_core::{Dialect, SigningConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// SMB message signer
#[derive(Parser, Debug)]
#[command(name = "smbsign")]
#[command(about = "Sign a hex-encoded SMB packet")]
#[command(version)]
struct Args {
    /// Negotiated dialect (smb1, 2.0.2, 2.1, 3.0, 3.0.2, 3.1.1 or 0x0311 form)
    #[arg(short, long)]
    dialect: String,

    /// Session key from authentication (hex)
    #[arg(short = 'k', long)]
    session_key: String,

    /// SMB 3.1.1 preauth integrity hash (hex)
    #[arg(long)]
    preauth_hash: Option<String>,

    /// Sign even when only tree connect requests would be
    #[arg(long)]
    required: bool,

    /// Re-derive the SMB3 signing key for every message
    #[arg(long)]
    no_cache: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Packet to sign (hex)
    packet: String,
}

impl Args {
    fn into_request(self) -> Result<(SignRequest, Vec<u8>), CliError> {
        let dialect: Dialect = self.dialect.parse()?;
        let session_key = hex::decode(&self.session_key).map_err(CliError::hex("session key"))?;
        let preauth_hash = self
            .preauth_hash
            .map(|h| hex::decode(h).map_err(CliError::hex("preauth hash")))
            .transpose()?;
        let packet = hex::decode(&self.packet).map_err(CliError::hex("packet"))?;

        let config = SigningConfig { required: self.required, cache_signing_key: !self.no_cache };
        Ok((SignRequest { dialect, session_key, preauth_hash, config }, packet))
    }
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let (request, packet) = args.into_request()?;
    tracing::info!(dialect = %request.dialect, len = packet.len(), "signing packet");

    let signed = sign_packet(&request, &packet)?;
    if !signed.outcome.is_signed() {
        tracing::warn!("packet left unsigned by policy");
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", hex::encode(&signed.bytes))?;

    Ok(())
}
