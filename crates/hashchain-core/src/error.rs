use thiserror::Error;

/// Failure while constructing or appending a block.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The payload could not be canonically encoded for hashing.
    /// The block is not created and the ledger is left untouched.
    #[error("payload cannot be canonically encoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a chain failed verification. `index` is the position of the
/// offending block in the sequence, counted from genesis at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// A stored field was mutated after construction without recomputing
    /// the block hash.
    #[error("block {index}: stored hash does not match its recomputed hash")]
    HashMismatch { index: u64 },

    /// The block does not reference the hash of its predecessor.
    #[error("block {index}: previous_hash does not match the predecessor's hash")]
    BrokenLink { index: u64 },

    /// The stored payload can no longer be encoded, so the hash cannot be
    /// recomputed.
    #[error("block {index}: payload can no longer be encoded for hashing")]
    Unencodable { index: u64 },
}
