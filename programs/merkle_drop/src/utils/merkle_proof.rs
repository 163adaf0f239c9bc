use crate::constants::{HASH_BYTES, MAX_PROOF_LEN};
use crate::utils::hash_pair;

/// Returns true if `leaf` is part of the tree defined by `root`.
///
/// `proof` holds the sibling hashes on the branch from the leaf up to the
/// root. Each pair is hashed smaller-first, so the proof carries no left/right
/// information. An empty proof proves a single-leaf tree (`leaf == root`).
pub fn verify(proof: &[[u8; HASH_BYTES]], root: [u8; HASH_BYTES], leaf: [u8; HASH_BYTES]) -> bool {
    if proof.len() > MAX_PROOF_LEN {
        return false;
    }
    let computed = proof
        .iter()
        .fold(leaf, |current, sibling| hash_pair(&current, sibling));
    computed == root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hashv;

    #[test]
    fn empty_proof_requires_leaf_equal_root() {
        let leaf = [9u8; 32];
        assert!(verify(&[], leaf, leaf));
        assert!(!verify(&[], [8u8; 32], leaf));
    }

    #[test]
    fn sibling_equal_to_current_uses_plain_concatenation() {
        let leaf = [3u8; 32];
        let root = hashv(&[&leaf, &leaf]);
        assert!(verify(&[leaf], root, leaf));
    }

    #[test]
    fn sibling_order_is_numeric() {
        let low = [0u8; 32];
        let mut high = [0u8; 32];
        high[0] = 1;
        let root = hashv(&[&low, &high]);
        assert!(verify(&[high], root, low));
        assert!(verify(&[low], root, high));
        assert!(!verify(&[high], hashv(&[&high, &low]), low));
    }

    #[test]
    fn oversized_proof_is_rejected() {
        let proof = vec![[1u8; 32]; MAX_PROOF_LEN + 1];
        let root = proof.iter().fold([0u8; 32], |acc, s| hash_pair(&acc, s));
        assert!(!verify(&proof, root, [0u8; 32]));
    }
}
