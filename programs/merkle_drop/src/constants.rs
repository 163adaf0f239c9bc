/**
 * Engine Constants
 *
 * Fixed values shared by the hashing, verification and accounting code.
 * Anything here is part of the contract with the off-line tree builder or
 * with hosts that map engine errors onto program error codes.
 */

/// ===== MERKLE CONSTANTS =====

/// Size of every hash handled by the engine (leaves, roots, proof siblings)
pub const HASH_BYTES: usize = 32;

/// Root value that can never be produced by a real tree
/// - Rejected when adding a period
pub const EMPTY_ROOT: [u8; HASH_BYTES] = [0; HASH_BYTES];

/// Length of the encoded leaf preimage
/// - 32 bytes recipient key followed by the u64 amount in little-endian
pub const LEAF_PREIMAGE_LEN: usize = 32 + 8;

/// Upper bound on proof length accepted by the engine
/// - A sorted-pair tree of 2^64 leaves is already deeper than any real drop
/// - Longer proofs are rejected as invalid without hashing
pub const MAX_PROOF_LEN: usize = 64;

/// ===== ERROR CODE CONSTANTS =====

/// First custom error code, aligned with Anchor's custom error numbering
pub const ERROR_CODE_BASE: u32 = anchor_lang::error::ERROR_CODE_OFFSET;
