//! Storage migrations for pallet-equity-token.
//!
//! Each migration is versioned and runs exactly once. Wire them into the
//! runtime's `Executive` migration tuple, oldest first:
//!
//! ```ignore
//! pub type Executive = frame_executive::Executive<
//!     Runtime,
//!     Block,
//!     frame_system::ChainContext<Runtime>,
//!     Runtime,
//!     AllPalletsWithSystem,
//!     pallet_equity_token::migrations::v1::MigrateToV1<Runtime>,
//! >;
//! ```

use frame_support::{pallet_prelude::*, traits::OnRuntimeUpgrade};
use sp_std::marker::PhantomData;

use crate::{holders::HolderRegistry, Balances, Config, Pallet, LOG_TARGET};

/// Version 0 kept balances without a holder registry. Version 1 indexes every
/// account with a positive balance so `is_holder`, `holder_count` and
/// `holder_at` cover pre-existing positions.
pub mod v1 {
    use super::*;

    pub struct MigrateToV1<T>(PhantomData<T>);

    impl<T: Config> OnRuntimeUpgrade for MigrateToV1<T> {
        fn on_runtime_upgrade() -> Weight {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();
            if on_chain_version >= 1 {
                log::info!(
                    target: LOG_TARGET,
                    "Storage already at v{on_chain_version:?}, skipping v1 migration"
                );
                return T::DbWeight::get().reads(1);
            }

            let mut scanned: u64 = 0;
            let mut indexed: u64 = 0;
            for (account, balance) in Balances::<T>::iter() {
                scanned += 1;
                if balance > 0 && !HolderRegistry::<T>::is_holder(&account) {
                    HolderRegistry::<T>::add_holder(&account);
                    indexed += 1;
                }
            }
            StorageVersion::new(1).put::<Pallet<T>>();

            log::info!(
                target: LOG_TARGET,
                "Migrated to v1: scanned {scanned} balances, indexed {indexed} holders"
            );
            // Each scanned balance costs a balance read and an index read;
            // each indexed holder reads the count and writes slot, index, count.
            T::DbWeight::get()
                .reads_writes(1 + 2 * scanned + indexed, 1 + 3 * indexed)
        }

        #[cfg(feature = "try-runtime")]
        fn pre_upgrade() -> Result<sp_std::vec::Vec<u8>, sp_runtime::TryRuntimeError> {
            let holders = Balances::<T>::iter_values().filter(|b| *b > 0).count() as u32;
            Ok(holders.encode())
        }

        #[cfg(feature = "try-runtime")]
        fn post_upgrade(state: sp_std::vec::Vec<u8>) -> Result<(), sp_runtime::TryRuntimeError> {
            let expected: u32 = Decode::decode(&mut &state[..])
                .map_err(|_| sp_runtime::TryRuntimeError::Other("Failed to decode pre-state"))?;
            frame_support::ensure!(
                HolderRegistry::<T>::holder_count() == expected,
                sp_runtime::TryRuntimeError::Other("holder count does not match positive balances")
            );
            frame_support::ensure!(
                Pallet::<T>::on_chain_storage_version() >= 1,
                sp_runtime::TryRuntimeError::Other("Migration to v1 did not complete")
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{new_test_ext, EquityToken, Test};
    use crate::{HolderCount, HolderIndex, Holders};
    use frame_support::traits::StorageVersion;

    /// Forget every holder slot, as a v0 chain would look.
    fn wipe_holder_registry() {
        let _ = Holders::<Test>::clear(u32::MAX, None);
        let _ = HolderIndex::<Test>::clear(u32::MAX, None);
        HolderCount::<Test>::kill();
    }

    #[test]
    fn migration_v1_indexes_existing_balances() {
        new_test_ext().execute_with(|| {
            StorageVersion::new(0).put::<Pallet<Test>>();
            wipe_holder_registry();
            Balances::<Test>::insert(77, 0);
            assert_eq!(EquityToken::holder_count(), 0);

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 1);
            assert!(EquityToken::is_holder(&2));
            assert!(EquityToken::is_holder(&3));
            assert!(!EquityToken::is_holder(&77));
            assert_eq!(EquityToken::holder_count(), 2);
            assert_eq!(EquityToken::do_try_state(), Ok(()));
        });
    }

    #[test]
    fn migration_v1_idempotent() {
        new_test_ext().execute_with(|| {
            StorageVersion::new(0).put::<Pallet<Test>>();
            wipe_holder_registry();

            v1::MigrateToV1::<Test>::on_runtime_upgrade();
            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            assert_eq!(EquityToken::holder_count(), 2);
            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 1);
        });
    }

    #[test]
    fn migration_v1_skipped_on_higher_version() {
        new_test_ext().execute_with(|| {
            StorageVersion::new(5).put::<Pallet<Test>>();
            wipe_holder_registry();

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            // Nothing rebuilt because the migration did not run.
            assert_eq!(EquityToken::holder_count(), 0);
            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 5);
        });
    }
}
