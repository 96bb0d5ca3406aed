use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("proof search cancelled")]
    Cancelled,

    #[error("no proof found in the u64 range")]
    ProofSpaceExhausted,
}
