//! Whitelist Merkle commitment verification.
//!
//! The whitelist is committed to as a binary Merkle tree over keccak-256
//! hashes. Each interior node is the hash of its two children concatenated in
//! ascending byte order, so a proof is just the list of siblings from the leaf
//! upward with no left/right direction bits.
//!
//! Only verification lives here. Building trees and proofs is left to the
//! off-chain tooling that publishes the root.

use codec::Encode;
use sp_io::hashing::keccak_256;

/// A 32-byte keccak-256 digest.
pub type Hash32 = [u8; 32];

/// Leaf committed to the whitelist for `who`: `keccak_256(SCALE(who))`.
pub fn leaf_for<AccountId: Encode>(who: &AccountId) -> Hash32 {
    who.using_encoded(keccak_256)
}

/// Hash two nodes together, smaller one first.
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo);
    buf[32..].copy_from_slice(hi);
    keccak_256(&buf)
}

/// Fold `proof` over `leaf`, returning the root it implies.
pub fn compute_root(leaf: &Hash32, proof: &[Hash32]) -> Hash32 {
    proof.iter().fold(*leaf, |node, sibling| hash_pair(&node, sibling))
}

/// True iff `proof` connects `leaf` to `root`.
pub fn verify(root: &Hash32, leaf: &Hash32, proof: &[Hash32]) -> bool {
    compute_root(leaf, proof) == *root
}
