//! Admission registry.
//!
//! An identity is admitted either explicitly, with an admission hash recorded
//! by the admitting authority, or by proving its leaf against the published
//! whitelist root. Explicit hashes stay on record for audits; whitelist claims
//! only count while the root they were proven against is still published.
//! An identity that has been cancelled and reissued is no longer admitted.

use sp_std::marker::PhantomData;

use crate::{
    merkle::{self, Hash32},
    Admissions, Config, Reissued, WhitelistClaims, WhitelistRoot,
};

pub struct IdentityRegistry<T>(PhantomData<T>);

impl<T: Config> IdentityRegistry<T> {
    pub fn is_verified(who: &T::AccountId) -> bool {
        if Self::is_superseded(who) {
            return false;
        }
        Admissions::<T>::contains_key(who) || Self::holds_current_claim(who)
    }

    pub fn has_hash(who: &T::AccountId, hash: &Hash32) -> bool {
        Admissions::<T>::get(who).as_ref() == Some(hash)
    }

    pub fn is_superseded(who: &T::AccountId) -> bool {
        Reissued::<T>::contains_key(who)
    }

    /// Record `hash` for `who`, returning the hash it replaced.
    pub fn admit(who: &T::AccountId, hash: Hash32) -> Option<Hash32> {
        Admissions::<T>::mutate(who, |slot| slot.replace(hash))
    }

    /// Checks `leaf` belongs to `who` and that `proof` ties it to the current
    /// whitelist root. Reads only.
    pub fn verify_against_root(who: &T::AccountId, leaf: &Hash32, proof: &[Hash32]) -> bool {
        let Some(root) = WhitelistRoot::<T>::get() else {
            return false;
        };
        *leaf == merkle::leaf_for(who) && merkle::verify(&root, leaf, proof)
    }

    /// Remember that `who` proved membership against `root`.
    pub fn record_claim(who: &T::AccountId, root: Hash32) {
        WhitelistClaims::<T>::insert(who, root);
    }

    fn holds_current_claim(who: &T::AccountId) -> bool {
        match (WhitelistClaims::<T>::get(who), WhitelistRoot::<T>::get()) {
            (Some(claimed), Some(current)) => claimed == current,
            _ => false,
        }
    }
}
