pub mod block;
pub mod error;
pub mod model;
pub mod pow;
pub mod shared;

pub use block::Block;
pub use error::LedgerError;
pub use model::Ledger;
pub use pow::{CancelToken, proof_of_work};
pub use shared::SharedLedger;

/// Default Proof-of-Work difficulty (number of leading hex zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Upper bound for the difficulty: a SHA-256 hex digest has 64 characters.
pub const MAX_DIFFICULTY: u32 = 64;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Placeholder `previous_hash` of the genesis block; never a real digest.
pub const GENESIS_PREVIOUS_HASH: &str = "1";
