//! Benchmarking setup for pallet-equity-token

use super::*;

#[allow(unused)]
use crate::Pallet as EquityToken;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

const SEED: u32 = 0;

fn admitted<T: Config>(name: &'static str) -> T::AccountId {
    let who: T::AccountId = account(name, 0, SEED);
    IdentityRegistry::<T>::admit(&who, [1u8; 32]);
    who
}

fn funded<T: Config>(name: &'static str, amount: u128) -> T::AccountId {
    let who = admitted::<T>(name);
    Balances::<T>::insert(&who, amount);
    HolderRegistry::<T>::add_holder(&who);
    TotalSupply::<T>::mutate(|supply| *supply += amount);
    who
}

/// Make sure the pallet controls both sheets regardless of genesis.
fn take_custody<T: Config>() {
    let me = Pallet::<T>::orchestrator_account();
    LedgerControllers::<T>::insert(LedgerKind::Balances, &me);
    LedgerControllers::<T>::insert(LedgerKind::Allowances, &me);
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn admit() {
        let who: T::AccountId = account("who", 0, SEED);
        let origin = T::AdmissionOrigin::try_successful_origin().expect("Admission origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, who.clone(), [7u8; 32]);

        assert!(IdentityRegistry::<T>::is_verified(&who));
    }

    #[benchmark]
    fn set_whitelist_root() {
        let origin = T::AdmissionOrigin::try_successful_origin().expect("Admission origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, Some([9u8; 32]));

        assert_eq!(WhitelistRoot::<T>::get(), Some([9u8; 32]));
    }

    #[benchmark]
    fn claim_whitelist(p: Linear<0, { T::MaxProofDepth::get() }>) {
        let caller: T::AccountId = whitelisted_caller();
        let siblings: Vec<Hash32> = (0..p).map(|i| [i as u8; 32]).collect();
        let root = merkle::compute_root(&merkle::leaf_for(&caller), &siblings);
        WhitelistRoot::<T>::put(root);
        let proof: BoundedVec<Hash32, T::MaxProofDepth> =
            siblings.try_into().expect("within MaxProofDepth");

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), proof);

        assert!(IdentityRegistry::<T>::is_verified(&caller));
    }

    #[benchmark]
    fn mint() {
        take_custody::<T>();
        let recipient = admitted::<T>("recipient");
        let amount: u128 = 1_000_000;
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
    }

    #[benchmark]
    fn transfer() {
        take_custody::<T>();
        let caller: T::AccountId = whitelisted_caller();
        IdentityRegistry::<T>::admit(&caller, [1u8; 32]);
        Balances::<T>::insert(&caller, 10_000_000);
        HolderRegistry::<T>::add_holder(&caller);
        // Filler holder so draining the caller exercises the swap path.
        funded::<T>("filler", 1);
        let recipient = admitted::<T>("recipient");

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), recipient.clone(), 10_000_000);

        assert_eq!(Balances::<T>::get(&recipient), 10_000_000);
        assert!(!HolderRegistry::<T>::is_holder(&caller));
    }

    #[benchmark]
    fn transfer_from() {
        take_custody::<T>();
        let spender: T::AccountId = whitelisted_caller();
        let owner = funded::<T>("owner", 10_000_000);
        let recipient = admitted::<T>("recipient");
        Allowances::<T>::insert(&owner, &spender, 10_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(spender.clone()), owner.clone(), recipient.clone(), 10_000_000);

        assert_eq!(Allowances::<T>::get(&owner, &spender), 0);
    }

    #[benchmark]
    fn approve() {
        take_custody::<T>();
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, SEED);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), 5_000);

        assert_eq!(Allowances::<T>::get(&caller, &spender), 5_000);
    }

    #[benchmark]
    fn increase_allowance() {
        take_custody::<T>();
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, SEED);
        Allowances::<T>::insert(&caller, &spender, 5_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), 1_000);

        assert_eq!(Allowances::<T>::get(&caller, &spender), 6_000);
    }

    #[benchmark]
    fn decrease_allowance() {
        take_custody::<T>();
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, SEED);
        Allowances::<T>::insert(&caller, &spender, 5_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), 1_000);

        assert_eq!(Allowances::<T>::get(&caller, &spender), 4_000);
    }

    #[benchmark]
    fn set_locking_period() {
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, 1_000);

        assert_eq!(LockingPeriod::<T>::get(), 1_000);
    }

    #[benchmark]
    fn cancel_and_reissue() {
        take_custody::<T>();
        // A one-link chain so the call resolves before moving the balance.
        let first = funded::<T>("first", 1_000);
        let second = admitted::<T>("second");
        Pallet::<T>::do_cancel_and_reissue(&first, &second).expect("first reissue");
        let replacement = admitted::<T>("replacement");
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, first.clone(), replacement.clone());

        assert_eq!(Pallet::<T>::get_current_for(&first), replacement);
    }

    #[benchmark]
    fn nominate_controller() {
        let caller: T::AccountId = whitelisted_caller();
        LedgerControllers::<T>::insert(LedgerKind::Balances, &caller);
        let candidate: T::AccountId = account("candidate", 0, SEED);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), LedgerKind::Balances, candidate.clone());

        assert_eq!(PendingLedgerControllers::<T>::get(LedgerKind::Balances), Some(candidate));
    }

    #[benchmark]
    fn accept_control() {
        let caller: T::AccountId = whitelisted_caller();
        PendingLedgerControllers::<T>::insert(LedgerKind::Balances, &caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), LedgerKind::Balances);

        assert_eq!(LedgerControllers::<T>::get(LedgerKind::Balances), Some(caller));
    }

    impl_benchmark_test_suite!(EquityToken, crate::mock::new_test_ext(), crate::mock::Test);
}
