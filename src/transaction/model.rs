use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Sender used for the mining reward.
pub const REWARD_SENDER: &str = "0";

/// Amount minted for the node that seals a block.
pub const MINING_REWARD: u64 = 1;

/// A value transfer waiting in the pending pool or sealed into a block.
/// Transactions carry no id: they are identified by their position.
///
/// `amount` is any JSON number (integer, negative or fractional) and is
/// kept in the exact textual form it arrived in, so it hashes as such.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    /// Reward paid to `node_id` for solving the proof of a block.
    pub fn reward(node_id: &str) -> Self {
        Self::new(REWARD_SENDER, node_id, MINING_REWARD)
    }
}
