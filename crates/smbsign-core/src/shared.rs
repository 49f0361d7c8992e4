//! Signing context shared between concurrent senders.

#![allow(clippy::disallowed_types, reason = "Lock is never held across an await")]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    SigningContext, SigningError, Smb1Packet, Smb2Packet,
    signer::{self, SignOutcome},
};

/// A [`SigningContext`] behind a mutex.
///
/// Each signing call holds the lock from reading the sequence counter until
/// the signature is written, so concurrent SMB1 senders get distinct,
/// gap-free sequence numbers. Callers that also enforce wire ordering should
/// keep the lock scope in mind: a message signed with sequence number `n`
/// must reach the server before the one signed with `n + 1`.
///
/// Wraps `Arc<Mutex<>>`, so clones share the same context.
#[derive(Debug, Clone)]
pub struct SharedSigningContext {
    inner: Arc<Mutex<SigningContext>>,
}

impl SharedSigningContext {
    /// Share `ctx`.
    pub fn new(ctx: SigningContext) -> Self {
        Self { inner: Arc::new(Mutex::new(ctx)) }
    }

    /// Sign an SMB1 message under the lock.
    pub fn sign_smb1<P: Smb1Packet + ?Sized>(&self, packet: &mut P) -> SignOutcome {
        signer::sign_smb1(packet, &mut self.lock())
    }

    /// Sign an SMB2/3 message under the lock.
    ///
    /// # Errors
    ///
    /// See [`signer::sign_smb2`].
    pub fn sign_smb2<P: Smb2Packet + ?Sized>(
        &self,
        packet: &mut P,
    ) -> Result<SignOutcome, SigningError> {
        signer::sign_smb2(packet, &mut self.lock())
    }

    /// Current sequence counter.
    pub fn sequence_counter(&self) -> u64 {
        self.lock().sequence_counter()
    }

    /// Run `f` with exclusive access to the context.
    pub fn with<R>(&self, f: impl FnOnce(&mut SigningContext) -> R) -> R {
        f(&mut self.lock())
    }

    // Poisoning is ignored: every context field is written by a single assignment
    fn lock(&self) -> MutexGuard<'_, SigningContext> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
