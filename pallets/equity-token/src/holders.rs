//! Compacting set of identities with a positive balance.
//!
//! Stored as a dense `index -> account` array plus the reverse
//! `account -> index` map. Removal moves the tail entry into the freed slot,
//! so membership, insertion and removal are all constant-time and the
//! enumeration order is not stable.

use sp_std::marker::PhantomData;

use crate::{Config, HolderCount, HolderIndex, Holders};

pub struct HolderRegistry<T>(PhantomData<T>);

impl<T: Config> HolderRegistry<T> {
    pub fn is_holder(who: &T::AccountId) -> bool {
        HolderIndex::<T>::contains_key(who)
    }

    pub fn holder_count() -> u32 {
        HolderCount::<T>::get()
    }

    pub fn holder_at(index: u32) -> Option<T::AccountId> {
        Holders::<T>::get(index)
    }

    pub fn add_holder(who: &T::AccountId) {
        if Self::is_holder(who) {
            return;
        }
        let index = HolderCount::<T>::get();
        Holders::<T>::insert(index, who);
        HolderIndex::<T>::insert(who, index);
        HolderCount::<T>::put(index.saturating_add(1));
        log::trace!(target: crate::LOG_TARGET, "holder added at slot {index}");
    }

    pub fn remove_holder(who: &T::AccountId) {
        let Some(index) = HolderIndex::<T>::take(who) else {
            return;
        };
        let last = HolderCount::<T>::get().saturating_sub(1);
        let tail = Holders::<T>::take(last);
        if index != last {
            if let Some(moved) = tail {
                Holders::<T>::insert(index, &moved);
                HolderIndex::<T>::insert(&moved, index);
            }
        }
        HolderCount::<T>::put(last);
        log::trace!(target: crate::LOG_TARGET, "holder removed from slot {index}");
    }

    /// Keep membership in line with a balance that just changed.
    pub fn sync(who: &T::AccountId, balance: u128) {
        if balance == 0 {
            Self::remove_holder(who);
        } else {
            Self::add_holder(who);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::*;

    type Registry = HolderRegistry<Test>;

    fn members() -> Vec<u64> {
        let mut all: Vec<u64> =
            (0..Registry::holder_count()).filter_map(Registry::holder_at).collect();
        all.sort();
        all
    }

    #[test]
    fn add_is_idempotent() {
        new_test_ext().execute_with(|| {
            let before = Registry::holder_count();
            Registry::add_holder(&40);
            Registry::add_holder(&40);
            assert_eq!(Registry::holder_count(), before + 1);
            assert!(Registry::is_holder(&40));
        });
    }

    #[test]
    fn remove_of_absent_is_noop() {
        new_test_ext().execute_with(|| {
            let before = Registry::holder_count();
            Registry::remove_holder(&40);
            assert_eq!(Registry::holder_count(), before);
        });
    }

    #[test]
    fn remove_swaps_tail_into_slot() {
        new_test_ext().execute_with(|| {
            let start = Registry::holder_count();
            for who in [40, 41, 42] {
                Registry::add_holder(&who);
            }
            Registry::remove_holder(&40);

            assert!(!Registry::is_holder(&40));
            assert_eq!(Registry::holder_count(), start + 2);
            // 42 was the tail and now sits in 40's old slot.
            assert_eq!(Registry::holder_at(start), Some(42));
            assert_eq!(HolderIndex::<Test>::get(42), Some(start));
            assert_eq!(Registry::holder_at(start + 2), None);
        });
    }

    #[test]
    fn remove_tail_shrinks_without_swap() {
        new_test_ext().execute_with(|| {
            let start = Registry::holder_count();
            Registry::add_holder(&40);
            Registry::add_holder(&41);
            Registry::remove_holder(&41);
            assert_eq!(Registry::holder_at(start), Some(40));
            assert_eq!(Registry::holder_at(start + 1), None);
            assert_eq!(Registry::holder_count(), start + 1);
        });
    }

    #[test]
    fn draining_everyone_empties_the_set() {
        new_test_ext().execute_with(|| {
            for who in [40, 41, 42, 43] {
                Registry::add_holder(&who);
            }
            for who in members() {
                Registry::remove_holder(&who);
            }
            assert_eq!(Registry::holder_count(), 0);
            assert!(members().is_empty());
        });
    }
}
