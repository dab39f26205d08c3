//! Placeholder weights for pallet-equity-token.
//!
//! The `()` implementation uses flat execution costs plus the storage
//! accesses each call performs on its worst path. Replace with generated
//! weights once the benchmarks in `benchmarking.rs` have been run on
//! reference hardware.

#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};
use sp_std::marker::PhantomData;

pub trait WeightInfo {
    fn admit() -> Weight;
    fn set_whitelist_root() -> Weight;
    fn claim_whitelist(p: u32) -> Weight;
    fn mint() -> Weight;
    fn transfer() -> Weight;
    fn transfer_from() -> Weight;
    fn approve() -> Weight;
    fn increase_allowance() -> Weight;
    fn decrease_allowance() -> Weight;
    fn set_locking_period() -> Weight;
    fn cancel_and_reissue() -> Weight;
    fn nominate_controller() -> Weight;
    fn accept_control() -> Weight;
}

impl WeightInfo for () {
    fn admit() -> Weight {
        Weight::from_parts(10_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn set_whitelist_root() -> Weight {
        Weight::from_parts(8_000_000, 0).saturating_add(RocksDbWeight::get().writes(1))
    }
    fn claim_whitelist(p: u32) -> Weight {
        Weight::from_parts(12_000_000, 0)
            .saturating_add(Weight::from_parts(1_500_000, 0).saturating_mul(p.into()))
            .saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn mint() -> Weight {
        Weight::from_parts(25_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(6, 5))
    }
    fn transfer() -> Weight {
        Weight::from_parts(35_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(14, 9))
    }
    fn transfer_from() -> Weight {
        Weight::from_parts(40_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(16, 10))
    }
    fn approve() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn increase_allowance() -> Weight {
        Weight::from_parts(13_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(3, 1))
    }
    fn decrease_allowance() -> Weight {
        Weight::from_parts(13_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(3, 1))
    }
    fn set_locking_period() -> Weight {
        Weight::from_parts(8_000_000, 0).saturating_add(RocksDbWeight::get().writes(1))
    }
    fn cancel_and_reissue() -> Weight {
        Weight::from_parts(45_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(16, 11))
    }
    fn nominate_controller() -> Weight {
        Weight::from_parts(10_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn accept_control() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(2, 2))
    }
}

/// Same figures as `()`, charged against the runtime's configured database
/// weights.
pub struct SubstrateWeight<T>(PhantomData<T>);

impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    fn admit() -> Weight {
        Weight::from_parts(10_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn set_whitelist_root() -> Weight {
        Weight::from_parts(8_000_000, 0).saturating_add(T::DbWeight::get().writes(1))
    }
    fn claim_whitelist(p: u32) -> Weight {
        Weight::from_parts(12_000_000, 0)
            .saturating_add(Weight::from_parts(1_500_000, 0).saturating_mul(p.into()))
            .saturating_add(T::DbWeight::get().reads_writes(2, 1))
    }
    fn mint() -> Weight {
        Weight::from_parts(25_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(6, 5))
    }
    fn transfer() -> Weight {
        Weight::from_parts(35_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(14, 9))
    }
    fn transfer_from() -> Weight {
        Weight::from_parts(40_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(16, 10))
    }
    fn approve() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(2, 1))
    }
    fn increase_allowance() -> Weight {
        Weight::from_parts(13_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(3, 1))
    }
    fn decrease_allowance() -> Weight {
        Weight::from_parts(13_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(3, 1))
    }
    fn set_locking_period() -> Weight {
        Weight::from_parts(8_000_000, 0).saturating_add(T::DbWeight::get().writes(1))
    }
    fn cancel_and_reissue() -> Weight {
        Weight::from_parts(45_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(16, 11))
    }
    fn nominate_controller() -> Weight {
        Weight::from_parts(10_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn accept_control() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(2, 2))
    }
}
