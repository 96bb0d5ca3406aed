use crate::blockchain::SharedLedger;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Shared application state: the node's ledger and its mining identity.
pub struct AppState {
    pub ledger: SharedLedger,
    pub node_id: String,
}

impl AppState {
    pub fn new(difficulty: u32, node_id: impl Into<String>) -> Self {
        Self {
            ledger: SharedLedger::new(difficulty),
            node_id: node_id.into(),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<crate::blockchain::Block>,
    pub length: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize, Deserialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transaction: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- TX API Models ---------- */

/// Incoming transaction; every field is required, checked by the handler
/// so a missing one yields the plain "Missing values" reply. Any JSON
/// number is accepted as amount.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<Number>,
}

impl NewTxRequest {
    pub fn into_transaction(self) -> Option<Transaction> {
        Some(Transaction::new(self.sender?, self.recipient?, self.amount?))
    }
}

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct PendingResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}
