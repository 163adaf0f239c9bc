//! Keccak-256 hashing shared by leaf construction and proof recombination.
//!
//! The algorithm and the leaf encoding are a fixed contract with the off-line
//! tree builder: `leaf = keccak256(recipient || amount_le)` and
//! `node = keccak256(min(a, b) || max(a, b))`.
use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::keccak;

use crate::constants::{HASH_BYTES, LEAF_PREIMAGE_LEN};

pub fn hash(bytes: &[u8]) -> [u8; HASH_BYTES] {
    keccak::hash(bytes).to_bytes()
}

pub fn hashv(parts: &[&[u8]]) -> [u8; HASH_BYTES] {
    keccak::hashv(parts).to_bytes()
}

/// Byte encoding of a `(recipient, amount)` entry: 32 key bytes, then the
/// amount as little-endian u64.
pub fn encode_leaf(recipient: &Pubkey, amount: u64) -> [u8; LEAF_PREIMAGE_LEN] {
    let mut preimage = [0u8; LEAF_PREIMAGE_LEN];
    preimage[..32].copy_from_slice(recipient.as_ref());
    preimage[32..].copy_from_slice(&amount.to_le_bytes());
    preimage
}

pub fn leaf_hash(recipient: &Pubkey, amount: u64) -> [u8; HASH_BYTES] {
    hash(&encode_leaf(recipient, amount))
}

/// Parent of two nodes, smaller value first.
pub fn hash_pair(a: &[u8; HASH_BYTES], b: &[u8; HASH_BYTES]) -> [u8; HASH_BYTES] {
    if a <= b {
        hashv(&[a, b])
    } else {
        hashv(&[b, a])
    }
}
