use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sha2::{Digest, Sha256};

use super::LedgerError;

/// How many candidates are tested between two cancellation checks.
const CANCEL_POLL_INTERVAL: u64 = 4096;

/// Check whether `proof` solves the puzzle posed by `last_proof`: the
/// SHA-256 of their concatenated decimal text must start with
/// `difficulty` hex zeros.
pub fn valid_proof(last_proof: u64, proof: u64, difficulty: u32) -> bool {
    let guess = format!("{last_proof}{proof}");
    let mut hasher = Sha256::new();
    hasher.update(guess.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest.chars().take(difficulty as usize).all(|c| c == '0')
}

/// Find the smallest proof satisfying [`valid_proof`] for `last_proof`.
///
/// The search has no iteration cap; it only stops early when `cancel`
/// fires, in which case nothing has been mutated and the caller can
/// simply drop the result.
pub fn proof_of_work(
    last_proof: u64,
    difficulty: u32,
    cancel: &CancelToken,
) -> Result<u64, LedgerError> {
    let mut proof: u64 = 0;
    loop {
        if proof % CANCEL_POLL_INTERVAL == 0 && cancel.is_cancelled() {
            return Err(LedgerError::Cancelled);
        }
        if valid_proof(last_proof, proof, difficulty) {
            return Ok(proof);
        }
        proof = proof.checked_add(1).ok_or(LedgerError::ProofSpaceExhausted)?;
    }
}

/// Shared flag used to abort a running [`proof_of_work`] from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Guard that cancels the token when dropped, e.g. when the request
    /// future waiting on a search is dropped by a disconnecting client.
    pub fn drop_guard(&self) -> CancelOnDrop {
        CancelOnDrop {
            token: self.clone(),
            armed: true,
        }
    }
}

pub struct CancelOnDrop {
    token: CancelToken,
    armed: bool,
}

impl CancelOnDrop {
    /// Keep the search result: dropping the guard no longer cancels.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.token.cancel();
        }
    }
}
