pub mod constants;
mod error;

pub use error::{ChainError, IntegrityError};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

pub type Hash = [u8; 32];

/// Sample payload used by the demo driver and the tests. The ledger itself
/// never looks inside a payload; any `Serialize` type works.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: String,
    pub to: String,
    pub amount: u64,
}

/// One link of the chain. `hash` is fixed at construction; every field is
/// covered by it, so any later mutation is detectable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block<T> {
    pub index: u64,
    pub timestamp: u64,
    pub data: T,
    pub previous_hash: Hash,
    pub hash: Hash,
}

impl<T: Serialize> Block<T> {
    pub fn new(
        index: u64,
        timestamp: u64,
        data: T,
        previous_hash: Hash,
    ) -> Result<Self, ChainError> {
        let hash = block_hash(index, timestamp, &data, &previous_hash)?;
        Ok(Self {
            index,
            timestamp,
            data,
            previous_hash,
            hash,
        })
    }
}

/// SHA-256 over the canonical JSON encoding of the payload. Struct fields
/// serialize in declaration order, so the byte stream is stable for a
/// given payload type.
pub fn payload_digest<T: Serialize>(data: &T) -> Result<Hash, ChainError> {
    let bytes = serde_json::to_vec(data)?;
    Ok(sha256(&bytes))
}

/// Digest of a block's contents. Field order and encoding are fixed:
/// index (LE) || timestamp (LE) || payload digest || previous hash.
pub fn block_hash<T: Serialize>(
    index: u64,
    timestamp: u64,
    data: &T,
    previous_hash: &Hash,
) -> Result<Hash, ChainError> {
    let digest = payload_digest(data)?;
    let mut bytes = Vec::with_capacity(8 + 8 + 32 + 32);
    bytes.extend_from_slice(&index.to_le_bytes());
    bytes.extend_from_slice(&timestamp.to_le_bytes());
    bytes.extend_from_slice(&digest);
    bytes.extend_from_slice(previous_hash);
    Ok(sha256(&bytes))
}

fn sha256(bytes: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..]);
    out
}

/// Seconds since the Unix epoch.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs()
}

pub mod chain {
    use super::*;
    use crate::constants::{GENESIS_INDEX, GENESIS_PREVIOUS_HASH, GENESIS_TIMESTAMP};
    use tracing::debug;

    /// Append-only sequence of blocks rooted at a fixed genesis block.
    /// Blocks are exposed for serialization and inspection; mutating one in
    /// place is exactly what `verify` detects.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Ledger<T> {
        pub blocks: Vec<Block<T>>,
    }

    impl<T: Serialize> Ledger<T> {
        pub fn new() -> Result<Self, ChainError>
        where
            T: Default,
        {
            Self::with_genesis(T::default())
        }

        pub fn with_genesis(data: T) -> Result<Self, ChainError> {
            let genesis = genesis_block(data)?;
            Ok(Self {
                blocks: vec![genesis],
            })
        }

        pub fn tip(&self) -> &Block<T> {
            self.blocks.last().expect("ledger always holds genesis")
        }

        pub fn len(&self) -> usize {
            self.blocks.len()
        }

        pub fn is_empty(&self) -> bool {
            self.blocks.is_empty()
        }

        /// Append a block stamped with the current wall-clock time.
        pub fn append(&mut self, data: T) -> Result<&Block<T>, ChainError> {
            self.append_at(data, unix_timestamp())
        }

        /// Append a block with an explicit timestamp. The new block links to
        /// the current tip; on error the ledger is unchanged.
        pub fn append_at(&mut self, data: T, timestamp: u64) -> Result<&Block<T>, ChainError> {
            let tip = self.tip();
            let block = Block::new(tip.index + 1, timestamp, data, tip.hash)?;
            debug!(index = block.index, "block appended");
            self.blocks.push(block);
            Ok(&self.blocks[self.blocks.len() - 1])
        }

        /// Advisory boolean form of `verify`.
        pub fn is_valid(&self) -> bool {
            self.verify().is_ok()
        }

        /// Walk the chain from block 1 (genesis is the trusted root) and
        /// check, per block, that the stored hash matches the recomputed one
        /// and that the block references its predecessor's hash. Stops at
        /// the first failure. Read-only.
        pub fn verify(&self) -> Result<(), IntegrityError> {
            for i in 1..self.blocks.len() {
                let index = i as u64;
                let block = &self.blocks[i];
                let expected =
                    block_hash(block.index, block.timestamp, &block.data, &block.previous_hash)
                        .map_err(|_| IntegrityError::Unencodable { index })?;
                if expected != block.hash {
                    return Err(IntegrityError::HashMismatch { index });
                }
                if block.previous_hash != self.blocks[i - 1].hash {
                    return Err(IntegrityError::BrokenLink { index });
                }
            }
            Ok(())
        }
    }

    /// Genesis block: index 0, timestamp 0, zeroed previous hash. Fixed
    /// inputs keep fresh ledgers byte-for-byte reproducible.
    pub fn genesis_block<T: Serialize>(data: T) -> Result<Block<T>, ChainError> {
        Block::new(GENESIS_INDEX, GENESIS_TIMESTAMP, data, GENESIS_PREVIOUS_HASH)
    }
}
