#![cfg_attr(not(feature = "std"), no_std)]
// Storage getters are deprecated upstream but still the clearest read API here
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! # Equity Token Pallet
//!
//! A permissioned token ledger. Every sender and receiver must be admitted,
//! secondary transfers can be locked until a point in time, and a lost or
//! compromised identity can be cancelled and reissued: its whole position
//! moves to a replacement and a permanent forward link is left behind.
//!
//! The pallet is assembled from small components:
//!
//! - [`ledger::BalanceLedger`] and [`ledger::AllowanceLedger`]: sheets that
//!   only their controller may write, guarded by [`custody::Custody`].
//! - [`identity::IdentityRegistry`]: explicit admissions plus a Merkle
//!   whitelist ([`merkle`]).
//! - [`holders::HolderRegistry`]: the compacting set of non-zero holders.
//!
//! The dispatchables below are the only writers. They check every
//! precondition before the first storage write.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::{
    dispatch::DispatchResult,
    ensure,
    pallet_prelude::*,
    traits::{EnsureOrigin, UnixTime},
    PalletId,
};
use frame_system::{ensure_signed, pallet_prelude::*};
use scale_info::TypeInfo;
use sp_runtime::{traits::AccountIdConversion, RuntimeDebug};
use sp_std::prelude::*;

pub use pallet::*;

pub mod custody;
pub mod holders;
pub mod identity;
pub mod ledger;
pub mod merkle;
pub mod migrations;
pub mod weights;

pub use weights::WeightInfo;

use custody::Custody;
use holders::HolderRegistry;
use identity::IdentityRegistry;
use ledger::{AllowanceLedger, BalanceLedger};
use merkle::Hash32;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub(crate) const LOG_TARGET: &str = "pallet-equity-token";

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

/// The two custody-guarded sub-ledgers.
#[derive(
    Encode,
    Decode,
    DecodeWithMemTracking,
    MaxEncodedLen,
    TypeInfo,
    Clone,
    Copy,
    PartialEq,
    Eq,
    RuntimeDebug,
)]
pub enum LedgerKind {
    Balances,
    Allowances,
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
        /// Token owner: mints, sets the lock, reissues, claims ledger custody.
        type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
        /// Admitting authority: records admissions and publishes the whitelist root.
        type AdmissionOrigin: EnsureOrigin<Self::RuntimeOrigin>;
        /// Wall clock for the locking period, in unix seconds.
        type UnixTime: UnixTime;
        /// Derives the orchestrator account that should control both sub-ledgers.
        #[pallet::constant]
        type PalletId: Get<PalletId>;
        /// Longest whitelist proof accepted by `claim_whitelist`.
        #[pallet::constant]
        type MaxProofDepth: Get<u32>;
        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "Acme Preferred Shares")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol (e.g., "ACMEP")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    /// Token decimals (0 for whole shares)
    #[pallet::storage]
    #[pallet::getter(fn decimals)]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    /// Total token supply
    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    /// Unix second before which secondary transfers fail. Zero means unlocked.
    #[pallet::storage]
    #[pallet::getter(fn locking_period)]
    pub type LockingPeriod<T> = StorageValue<_, u64, ValueQuery>;

    /// Balance sheet
    #[pallet::storage]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Allowance sheet, keyed by (owner, spender)
    #[pallet::storage]
    pub type Allowances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        u128,
        ValueQuery,
    >;

    /// Explicit admission hashes
    #[pallet::storage]
    pub type Admissions<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, Hash32>;

    /// Currently published whitelist Merkle root
    #[pallet::storage]
    #[pallet::getter(fn whitelist_root)]
    pub type WhitelistRoot<T> = StorageValue<_, Hash32>;

    /// Root each identity last proved whitelist membership against
    #[pallet::storage]
    pub type WhitelistClaims<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, Hash32>;

    /// Dense holder array: slot -> account
    #[pallet::storage]
    pub type Holders<T: Config> = StorageMap<_, Twox64Concat, u32, T::AccountId>;

    /// Reverse holder index: account -> slot
    #[pallet::storage]
    pub type HolderIndex<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u32>;

    /// Number of occupied holder slots
    #[pallet::storage]
    pub type HolderCount<T> = StorageValue<_, u32, ValueQuery>;

    /// Cancel-and-reissue forward links: retired account -> replacement
    #[pallet::storage]
    pub type Reissued<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, T::AccountId>;

    /// Number of reissue links ever recorded; bounds every chain walk
    #[pallet::storage]
    pub type ReissueCount<T> = StorageValue<_, u32, ValueQuery>;

    /// Controller of each sub-ledger
    #[pallet::storage]
    pub type LedgerControllers<T: Config> = StorageMap<_, Twox64Concat, LedgerKind, T::AccountId>;

    /// Nominated, not yet accepted, controller of each sub-ledger
    #[pallet::storage]
    pub type PendingLedgerControllers<T: Config> =
        StorageMap<_, Twox64Concat, LedgerKind, T::AccountId>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Account admitted for the first time
        Admitted { who: T::AccountId, hash: Hash32 },
        /// Admission hash replaced
        AdmissionUpdated { who: T::AccountId, old_hash: Hash32, new_hash: Hash32 },
        /// Whitelist root published (or withdrawn with `None`)
        WhitelistRootSet { root: Option<Hash32> },
        /// Account proved membership of the published whitelist
        WhitelistClaimed { who: T::AccountId, root: Hash32 },
        /// New tokens minted
        Minted { to: T::AccountId, amount: u128 },
        /// Tokens transferred from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: u128 },
        /// Allowance now stands at `amount`
        AllowanceChanged { owner: T::AccountId, spender: T::AccountId, amount: u128 },
        /// Secondary transfers locked until `until` (0 = unlocked)
        LockingPeriodSet { until: u64 },
        /// Position of `retired`, the account `requested` resolved to, moved
        /// to `replacement`
        Reissued {
            requested: T::AccountId,
            retired: T::AccountId,
            replacement: T::AccountId,
            amount: u128,
        },
        /// Sub-ledger controller named a successor
        ControllerNominated { ledger: LedgerKind, candidate: T::AccountId },
        /// Nominee took control of a sub-ledger
        ControlAccepted {
            ledger: LedgerKind,
            old_controller: Option<T::AccountId>,
            new_controller: T::AccountId,
        },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller lacks the required privilege
        Unauthorized,
        /// Sender or receiver is not admitted
        NotVerified,
        /// Locking period still in effect
        TransferLocked,
        InsufficientBalance,
        InsufficientAllowance,
        /// Amount must be non-zero
        InvalidAmount,
        /// Sub-ledger custody handoff has not been accepted yet
        ControlNotAccepted,
        /// Reissue would link an account back into its own chain
        ReissueCycle,
        /// Account has already been cancelled and reissued
        AlreadySuperseded,
        /// No whitelist root is published
        NoWhitelistRoot,
        /// Proof does not connect the caller to the whitelist root
        InvalidProof,
        Overflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::admit())]
        pub fn admit(origin: OriginFor<T>, who: T::AccountId, hash: Hash32) -> DispatchResult {
            T::AdmissionOrigin::ensure_origin(origin).map_err(|_| Error::<T>::Unauthorized)?;
            ensure!(!IdentityRegistry::<T>::is_superseded(&who), Error::<T>::AlreadySuperseded);
            match IdentityRegistry::<T>::admit(&who, hash) {
                None => Self::deposit_event(Event::Admitted { who, hash }),
                Some(old_hash) => {
                    Self::deposit_event(Event::AdmissionUpdated { who, old_hash, new_hash: hash })
                }
            }
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::set_whitelist_root())]
        pub fn set_whitelist_root(origin: OriginFor<T>, root: Option<Hash32>) -> DispatchResult {
            T::AdmissionOrigin::ensure_origin(origin).map_err(|_| Error::<T>::Unauthorized)?;
            WhitelistRoot::<T>::set(root);
            log::info!(target: LOG_TARGET, "whitelist root set to {root:?}");
            Self::deposit_event(Event::WhitelistRootSet { root });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::claim_whitelist(proof.len() as u32))]
        pub fn claim_whitelist(
            origin: OriginFor<T>,
            proof: BoundedVec<Hash32, T::MaxProofDepth>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(!IdentityRegistry::<T>::is_superseded(&who), Error::<T>::AlreadySuperseded);
            let root = WhitelistRoot::<T>::get().ok_or(Error::<T>::NoWhitelistRoot)?;
            let leaf = merkle::leaf_for(&who);
            ensure!(
                IdentityRegistry::<T>::verify_against_root(&who, &leaf, &proof),
                Error::<T>::InvalidProof
            );
            IdentityRegistry::<T>::record_claim(&who, root);
            Self::deposit_event(Event::WhitelistClaimed { who, root });
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin).map_err(|_| Error::<T>::Unauthorized)?;
            Self::do_mint(&to, amount)?;
            Self::deposit_event(Event::Minted { to, amount });
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::do_transfer(&sender, &to, amount, None)
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            from: T::AccountId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::do_transfer(&from, &to, amount, Some(&spender))
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(origin: OriginFor<T>, spender: T::AccountId, amount: u128) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            AllowanceLedger::<T>::set_allowance(
                &Self::orchestrator_account(),
                &owner,
                &spender,
                amount,
            )?;
            Self::deposit_event(Event::AllowanceChanged { owner, spender, amount });
            Ok(())
        }

        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::increase_allowance())]
        pub fn increase_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            delta: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            AllowanceLedger::<T>::add_allowance(
                &Self::orchestrator_account(),
                &owner,
                &spender,
                delta,
            )?;
            let amount = AllowanceLedger::<T>::allowance_of(&owner, &spender);
            Self::deposit_event(Event::AllowanceChanged { owner, spender, amount });
            Ok(())
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::decrease_allowance())]
        pub fn decrease_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            delta: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            AllowanceLedger::<T>::sub_allowance(
                &Self::orchestrator_account(),
                &owner,
                &spender,
                delta,
            )?;
            let amount = AllowanceLedger::<T>::allowance_of(&owner, &spender);
            Self::deposit_event(Event::AllowanceChanged { owner, spender, amount });
            Ok(())
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::set_locking_period())]
        pub fn set_locking_period(origin: OriginFor<T>, until: u64) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin).map_err(|_| Error::<T>::Unauthorized)?;
            LockingPeriod::<T>::put(until);
            log::info!(target: LOG_TARGET, "secondary transfers locked until {until}");
            Self::deposit_event(Event::LockingPeriodSet { until });
            Ok(())
        }

        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::cancel_and_reissue())]
        pub fn cancel_and_reissue(
            origin: OriginFor<T>,
            original: T::AccountId,
            replacement: T::AccountId,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin).map_err(|_| Error::<T>::Unauthorized)?;
            let (retired, amount) = Self::do_cancel_and_reissue(&original, &replacement)?;
            Self::deposit_event(Event::Reissued {
                requested: original,
                retired,
                replacement,
                amount,
            });
            Ok(())
        }

        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::nominate_controller())]
        pub fn nominate_controller(
            origin: OriginFor<T>,
            ledger: LedgerKind,
            candidate: T::AccountId,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Custody::<T>::nominate(ledger, &caller, candidate.clone())?;
            Self::deposit_event(Event::ControllerNominated { ledger, candidate });
            Ok(())
        }

        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::accept_control())]
        pub fn accept_control(origin: OriginFor<T>, ledger: LedgerKind) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::finish_handoff(ledger, caller)
        }

        /// Accept a pending nomination on behalf of the orchestrator account,
        /// which cannot sign for itself.
        #[pallet::call_index(13)]
        #[pallet::weight(T::WeightInfo::accept_control())]
        pub fn claim_ledger(origin: OriginFor<T>, ledger: LedgerKind) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin).map_err(|_| Error::<T>::Unauthorized)?;
            Self::finish_handoff(ledger, Self::orchestrator_account())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Token name
        pub token_name: Vec<u8>,
        /// Token symbol
        pub token_symbol: Vec<u8>,
        /// Token decimals
        pub decimals: u8,
        /// Initial controller of both sub-ledgers. `None` gives them to the
        /// orchestrator account straight away.
        pub ledger_custodian: Option<T::AccountId>,
        /// Accounts admitted at genesis, with their admission hashes
        pub admitted: Vec<(T::AccountId, Hash32)>,
        /// Whitelist root published at genesis
        pub whitelist_root: Option<Hash32>,
        /// Initial locking period (unix seconds, 0 = unlocked)
        pub locking_period: u64,
        /// Initial token mints (account, amount); accounts must be admitted
        pub initial_balances: Vec<(T::AccountId, u128)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            Decimals::<T>::put(self.decimals);

            let custodian =
                self.ledger_custodian.clone().unwrap_or_else(Pallet::<T>::orchestrator_account);
            LedgerControllers::<T>::insert(LedgerKind::Balances, &custodian);
            LedgerControllers::<T>::insert(LedgerKind::Allowances, &custodian);

            for (account, hash) in &self.admitted {
                IdentityRegistry::<T>::admit(account, *hash);
            }
            WhitelistRoot::<T>::set(self.whitelist_root);
            LockingPeriod::<T>::put(self.locking_period);

            let mut total: u128 = 0;
            for (account, amount) in &self.initial_balances {
                assert!(
                    IdentityRegistry::<T>::is_verified(account),
                    "Genesis balance assigned to an account that is not admitted"
                );
                let balance = Balances::<T>::get(account)
                    .checked_add(*amount)
                    .expect("Genesis balance overflows u128");
                Balances::<T>::insert(account, balance);
                HolderRegistry::<T>::sync(account, balance);
                total = total.checked_add(*amount).expect("Genesis supply overflows u128");
            }
            TotalSupply::<T>::put(total);
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Account the pallet acts as when writing to its sub-ledgers.
    pub fn orchestrator_account() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    pub fn balance_of(who: &T::AccountId) -> u128 {
        BalanceLedger::<T>::balance_of(who)
    }

    pub fn allowance_of(owner: &T::AccountId, spender: &T::AccountId) -> u128 {
        AllowanceLedger::<T>::allowance_of(owner, spender)
    }

    pub fn is_verified(who: &T::AccountId) -> bool {
        IdentityRegistry::<T>::is_verified(who)
    }

    pub fn has_hash(who: &T::AccountId, hash: &Hash32) -> bool {
        IdentityRegistry::<T>::has_hash(who, hash)
    }

    pub fn admission_hash(who: &T::AccountId) -> Option<Hash32> {
        Admissions::<T>::get(who)
    }

    pub fn verify_against_root(who: &T::AccountId, leaf: &Hash32, proof: &[Hash32]) -> bool {
        IdentityRegistry::<T>::verify_against_root(who, leaf, proof)
    }

    pub fn is_superseded(who: &T::AccountId) -> bool {
        IdentityRegistry::<T>::is_superseded(who)
    }

    pub fn is_holder(who: &T::AccountId) -> bool {
        HolderRegistry::<T>::is_holder(who)
    }

    pub fn holder_count() -> u32 {
        HolderRegistry::<T>::holder_count()
    }

    pub fn holder_at(index: u32) -> Option<T::AccountId> {
        HolderRegistry::<T>::holder_at(index)
    }

    pub fn ledger_controller(ledger: LedgerKind) -> Option<T::AccountId> {
        Custody::<T>::controller(ledger)
    }

    pub fn pending_controller(ledger: LedgerKind) -> Option<T::AccountId> {
        Custody::<T>::pending(ledger)
    }

    /// Controller of the balance sheet; equals [`Self::orchestrator_account`]
    /// once custody has been handed over.
    pub fn balance_ledger_address() -> Option<T::AccountId> {
        Custody::<T>::controller(LedgerKind::Balances)
    }

    pub fn allowance_ledger_address() -> Option<T::AccountId> {
        Custody::<T>::controller(LedgerKind::Allowances)
    }

    /// Follow reissue links from `who` to the account that holds its position
    /// today. The walk never takes more hops than links exist.
    pub fn get_current_for(who: &T::AccountId) -> T::AccountId {
        let mut current = who.clone();
        let mut hops = ReissueCount::<T>::get();
        while hops > 0 {
            match Reissued::<T>::get(&current) {
                Some(next) => current = next,
                None => break,
            }
            hops -= 1;
        }
        current
    }

    fn ensure_unlocked() -> DispatchResult {
        let until = LockingPeriod::<T>::get();
        if until != 0 {
            let now = T::UnixTime::now().as_secs();
            ensure!(now >= until, Error::<T>::TransferLocked);
        }
        Ok(())
    }

    fn finish_handoff(ledger: LedgerKind, new_controller: T::AccountId) -> DispatchResult {
        let old_controller = Custody::<T>::accept(ledger, &new_controller)?;
        log::info!(target: LOG_TARGET, "{ledger:?} ledger custody accepted");
        Self::deposit_event(Event::ControlAccepted { ledger, old_controller, new_controller });
        Ok(())
    }

    /// Issue `amount` to `to`. Not subject to the locking period.
    pub fn do_mint(to: &T::AccountId, amount: u128) -> DispatchResult {
        let me = Self::orchestrator_account();
        Custody::<T>::ensure_controller(LedgerKind::Balances, &me)?;
        ensure!(amount > 0, Error::<T>::InvalidAmount);
        ensure!(IdentityRegistry::<T>::is_verified(to), Error::<T>::NotVerified);

        let supply = TotalSupply::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;
        let balance =
            BalanceLedger::<T>::balance_of(to).checked_add(amount).ok_or(Error::<T>::Overflow)?;

        BalanceLedger::<T>::add_balance(&me, to, amount)?;
        TotalSupply::<T>::put(supply);
        HolderRegistry::<T>::sync(to, balance);

        log::debug!(target: LOG_TARGET, "minted {amount}, supply now {supply}");
        Ok(())
    }

    /// Move `amount` from `from` to `to`. With `spender` set this is a
    /// delegated transfer and also consumes `spender`'s allowance over `from`.
    ///
    /// Checks run in a fixed order so the first failing one is reported:
    /// custody, amount, lock, admission, balance, allowance.
    pub fn do_transfer(
        from: &T::AccountId,
        to: &T::AccountId,
        amount: u128,
        spender: Option<&T::AccountId>,
    ) -> DispatchResult {
        let me = Self::orchestrator_account();
        Custody::<T>::ensure_controller(LedgerKind::Balances, &me)?;
        if spender.is_some() {
            Custody::<T>::ensure_controller(LedgerKind::Allowances, &me)?;
        }
        ensure!(amount > 0, Error::<T>::InvalidAmount);
        Self::ensure_unlocked()?;
        ensure!(
            IdentityRegistry::<T>::is_verified(from) && IdentityRegistry::<T>::is_verified(to),
            Error::<T>::NotVerified
        );

        let from_balance = BalanceLedger::<T>::balance_of(from);
        ensure!(from_balance >= amount, Error::<T>::InsufficientBalance);
        if let Some(spender) = spender {
            ensure!(
                AllowanceLedger::<T>::allowance_of(from, spender) >= amount,
                Error::<T>::InsufficientAllowance
            );
        }

        if from != to {
            let to_balance = BalanceLedger::<T>::balance_of(to)
                .checked_add(amount)
                .ok_or(Error::<T>::Overflow)?;

            BalanceLedger::<T>::sub_balance(&me, from, amount)?;
            BalanceLedger::<T>::add_balance(&me, to, amount)?;
            HolderRegistry::<T>::sync(from, from_balance - amount);
            HolderRegistry::<T>::sync(to, to_balance);
        }

        if let Some(spender) = spender {
            AllowanceLedger::<T>::sub_allowance(&me, from, spender, amount)?;
            Self::deposit_event(Event::AllowanceChanged {
                owner: from.clone(),
                spender: spender.clone(),
                amount: AllowanceLedger::<T>::allowance_of(from, spender),
            });
        }

        log::debug!(target: LOG_TARGET, "transferred {amount}");
        Self::deposit_event(Event::Transferred { from: from.clone(), to: to.clone(), amount });
        Ok(())
    }

    /// Retire the account `original` currently resolves to and move its whole
    /// balance to `replacement`. Returns the retired account and the amount
    /// moved.
    pub fn do_cancel_and_reissue(
        original: &T::AccountId,
        replacement: &T::AccountId,
    ) -> Result<(T::AccountId, u128), DispatchError> {
        let me = Self::orchestrator_account();
        Custody::<T>::ensure_controller(LedgerKind::Balances, &me)?;

        let retired = Self::get_current_for(original);
        ensure!(
            *replacement != retired && Self::get_current_for(replacement) != retired,
            Error::<T>::ReissueCycle
        );
        ensure!(!IdentityRegistry::<T>::is_superseded(replacement), Error::<T>::AlreadySuperseded);
        ensure!(IdentityRegistry::<T>::is_verified(replacement), Error::<T>::NotVerified);

        let amount = BalanceLedger::<T>::balance_of(&retired);
        let new_balance = BalanceLedger::<T>::balance_of(replacement)
            .checked_add(amount)
            .ok_or(Error::<T>::Overflow)?;
        let links = ReissueCount::<T>::get().checked_add(1).ok_or(Error::<T>::Overflow)?;

        if amount > 0 {
            BalanceLedger::<T>::sub_balance(&me, &retired, amount)?;
            BalanceLedger::<T>::add_balance(&me, replacement, amount)?;
        }
        HolderRegistry::<T>::remove_holder(&retired);
        HolderRegistry::<T>::sync(replacement, new_balance);
        Reissued::<T>::insert(&retired, replacement);
        ReissueCount::<T>::put(links);

        log::info!(target: LOG_TARGET, "reissued position of {amount} to replacement account");
        Ok((retired, amount))
    }

    /// Cross-check the ledgers, the holder set and the reissue links.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
        let mut sum: u128 = 0;
        for (who, balance) in Balances::<T>::iter() {
            sum = sum.checked_add(balance).ok_or("balances overflow u128")?;
            ensure!(
                HolderRegistry::<T>::is_holder(&who) == (balance > 0),
                "holder set out of sync with balances"
            );
        }
        ensure!(sum == TotalSupply::<T>::get(), "balances do not sum to total supply");

        let count = HolderCount::<T>::get();
        let mut indexed: u32 = 0;
        for (who, slot) in HolderIndex::<T>::iter() {
            ensure!(slot < count, "holder slot beyond holder count");
            ensure!(Holders::<T>::get(slot).as_ref() == Some(&who), "holder slot points elsewhere");
            indexed += 1;
        }
        ensure!(indexed == count, "holder index and holder count disagree");

        for (retired, _) in Reissued::<T>::iter() {
            let terminal = Self::get_current_for(&retired);
            ensure!(!Reissued::<T>::contains_key(&terminal), "reissue chain does not terminate");
        }
        Ok(())
    }
}
