use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use super::{Block, CancelToken, Ledger, LedgerError, proof_of_work};
use crate::transaction::Transaction;

/// Thread-safe handle over a [`Ledger`].
///
/// The chain and the pending pool sit behind one lock so a submission is
/// either sealed into a block or left for the next one, never both.
/// Proof search runs outside that lock; a second lock keeps at most one
/// search in flight.
#[derive(Debug)]
pub struct SharedLedger {
    ledger: Mutex<Ledger>,
    mining: Mutex<()>,
}

impl SharedLedger {
    pub fn new(difficulty: u32) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new(difficulty)),
            mining: Mutex::new(()),
        }
    }

    // Every mutation completes before the guard drops, so a poisoned lock
    // still guards a consistent ledger.
    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    pub fn add_transaction(&self, tx: Transaction) -> u64 {
        self.lock().add_transaction(tx)
    }

    /// Solve the next proof, pay `node_id` the reward and seal the pending
    /// pool into a new block.
    pub fn mine(&self, node_id: &str, cancel: &CancelToken) -> Result<Block, LedgerError> {
        let _one_search = self.mining.lock().unwrap_or_else(PoisonError::into_inner);

        loop {
            let (tip_index, last_proof, difficulty) = {
                let ledger = self.lock();
                let tip = ledger.last_block();
                (tip.index, tip.proof, ledger.difficulty())
            };

            debug!("searching proof for block #{} (last_proof={last_proof})", tip_index + 1);
            let proof = proof_of_work(last_proof, difficulty, cancel)?;

            if let Some(block) = self.seal_on_tip(tip_index, proof, node_id) {
                return Ok(block);
            }
        }
    }

    /// Append the reward and seal, provided the chain still ends at
    /// `tip_index`. Returns `None` (ledger untouched) when the tip moved
    /// while `proof` was searched for.
    fn seal_on_tip(&self, tip_index: u64, proof: u64, node_id: &str) -> Option<Block> {
        let mut ledger = self.lock();
        let current = ledger.last_block().index;
        if current != tip_index {
            warn!("tip moved from #{tip_index} to #{current} during search, retrying");
            return None;
        }

        let previous_hash = ledger.last_block().hash();
        ledger.add_transaction(Transaction::reward(node_id));
        let block = ledger.seal_block(proof, Some(previous_hash)).clone();
        info!(
            "forged block #{} (proof={}, txs={} + reward)",
            block.index,
            block.proof,
            block.transactions.len() - 1
        );
        Some(block)
    }

    /// Snapshot of the full chain.
    pub fn chain(&self) -> Vec<Block> {
        self.lock().chain().to_vec()
    }

    /// Snapshot of the pending pool.
    pub fn pending(&self) -> Vec<Transaction> {
        self.lock().pending().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_valid_chain(&self) -> bool {
        self.lock().is_valid_chain()
    }
}
