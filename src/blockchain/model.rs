use log::debug;

use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF, pow};
use crate::transaction::Transaction;

/// In-memory ledger: the sealed chain plus the pool of pending transactions.
///
/// The chain always holds at least the genesis block; nothing removes
/// blocks, so `last_block` never fails.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    difficulty: u32,
}

impl Ledger {
    /// Initialize a ledger holding only the genesis block.
    pub fn new(difficulty: u32) -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
            difficulty,
        };
        ledger.seal_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        ledger
    }

    /// Queue a transaction for the next block and return that block's index.
    pub fn add_transaction(&mut self, tx: Transaction) -> u64 {
        self.pending.push(tx);
        self.last_block().index + 1
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds the genesis block")
    }

    /// Seal every pending transaction into a new block and append it.
    /// Without an explicit `previous_hash` the hash of the current tip is used.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash());
        let transactions = std::mem::take(&mut self.pending);
        let block = Block::new(
            self.chain.len() as u64 + 1,
            transactions,
            proof,
            previous_hash,
        );
        debug!(
            "sealed block #{} ({} txs, proof={})",
            block.index,
            block.transactions.len(),
            block.proof
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Verify the whole chain: genesis shape, index continuity, hash links
    /// and the proof pairing of every consecutive pair.
    pub fn is_valid_chain(&self) -> bool {
        validate_chain(&self.chain, self.difficulty)
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }
}

/// Chain validation independent of any ledger instance.
pub fn validate_chain(chain: &[Block], difficulty: u32) -> bool {
    let Some(genesis) = chain.first() else {
        return false;
    };
    if genesis.index != 1
        || genesis.proof != GENESIS_PROOF
        || genesis.previous_hash != GENESIS_PREVIOUS_HASH
    {
        return false;
    }

    chain.windows(2).all(|pair| {
        let (prev, current) = (&pair[0], &pair[1]);
        current.index == prev.index + 1
            && current.previous_hash == prev.hash()
            && pow::valid_proof(prev.proof, current.proof, difficulty)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{CancelToken, DEFAULT_DIFFICULTY, proof_of_work};

    fn mine_next(ledger: &mut Ledger, node_id: &str) -> Block {
        let last_proof = ledger.last_block().proof;
        let proof = proof_of_work(last_proof, ledger.difficulty(), &CancelToken::new()).unwrap();
        ledger.add_transaction(Transaction::reward(node_id));
        let previous_hash = ledger.last_block().hash();
        ledger.seal_block(proof, Some(previous_hash)).clone()
    }

    #[test]
    fn starts_with_genesis_only() {
        let ledger = Ledger::new(DEFAULT_DIFFICULTY);
        assert_eq!(ledger.len(), 1);
        let genesis = ledger.last_block();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, 100);
        assert_eq!(genesis.previous_hash, "1");
        assert!(genesis.transactions.is_empty());
        assert!(ledger.pending().is_empty());
        assert!(ledger.is_valid_chain());
    }

    #[test]
    fn add_transaction_targets_next_block() {
        let mut ledger = Ledger::new(DEFAULT_DIFFICULTY);
        assert_eq!(ledger.add_transaction(Transaction::new("a", "b", 1)), 2);
        assert_eq!(ledger.add_transaction(Transaction::new("b", "c", 2)), 2);
        assert_eq!(ledger.pending().len(), 2);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn seal_drains_pool_in_order() {
        let mut ledger = Ledger::new(DEFAULT_DIFFICULTY);
        let txs: Vec<_> = (0..5)
            .map(|i: u64| Transaction::new(format!("s{i}"), format!("r{i}"), i))
            .collect();
        for tx in &txs {
            ledger.add_transaction(tx.clone());
        }
        let genesis_hash = ledger.last_block().hash();

        let block = ledger.seal_block(42, None).clone();
        assert_eq!(block.index, 2);
        assert_eq!(block.transactions, txs);
        assert_eq!(block.previous_hash, genesis_hash);
        assert!(ledger.pending().is_empty());

        // Next submissions go to the following block.
        assert_eq!(ledger.add_transaction(Transaction::new("x", "y", 1)), 3);
    }

    #[test]
    fn seal_uses_explicit_previous_hash() {
        let mut ledger = Ledger::new(DEFAULT_DIFFICULTY);
        let block = ledger.seal_block(7, Some("override".into()));
        assert_eq!(block.previous_hash, "override");
    }

    #[test]
    fn alice_pays_bob_then_mine() {
        let mut ledger = Ledger::new(DEFAULT_DIFFICULTY);
        ledger.add_transaction(Transaction::new("alice", "bob", 5));
        let block = mine_next(&mut ledger, "node-1");

        assert_eq!(ledger.len(), 2);
        assert_eq!(
            block.transactions,
            vec![
                Transaction::new("alice", "bob", 5),
                Transaction::new("0", "node-1", 1),
            ]
        );
        assert_eq!(block.proof, 35293);
        assert_eq!(block.previous_hash, ledger.chain()[0].hash());
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn mined_chain_links_and_validates() {
        let mut ledger = Ledger::new(2);
        for _ in 0..4 {
            mine_next(&mut ledger, "node");
        }
        let chain = ledger.chain();
        assert_eq!(chain.len(), 5);
        for (i, block) in chain.iter().enumerate() {
            assert_eq!(block.index, i as u64 + 1);
        }
        for pair in chain.windows(2) {
            assert_eq!(pair[1].previous_hash, pair[0].hash());
            assert!(pow::valid_proof(pair[0].proof, pair[1].proof, 2));
        }
        assert!(ledger.is_valid_chain());
    }

    #[test]
    fn tampering_breaks_validation() {
        let mut ledger = Ledger::new(2);
        ledger.add_transaction(Transaction::new("alice", "bob", 5));
        mine_next(&mut ledger, "node");
        mine_next(&mut ledger, "node");

        let mut chain = ledger.chain().to_vec();
        assert!(validate_chain(&chain, 2));
        chain[1].transactions[0].amount = 500u64.into();
        assert!(!validate_chain(&chain, 2));

        let mut chain = ledger.chain().to_vec();
        chain[2].proof += 1;
        // Hash link of block 3 is untouched but the proof pairing may fail.
        assert_eq!(
            validate_chain(&chain, 2),
            pow::valid_proof(chain[1].proof, chain[2].proof, 2)
        );

        assert!(!validate_chain(&[], 2));
    }

    #[test]
    fn unmined_seal_fails_validation() {
        let mut ledger = Ledger::new(DEFAULT_DIFFICULTY);
        // 0 does not solve the genesis puzzle at difficulty 4.
        assert!(!pow::valid_proof(100, 0, DEFAULT_DIFFICULTY));
        ledger.seal_block(0, None);
        assert!(!ledger.is_valid_chain());
    }
}
