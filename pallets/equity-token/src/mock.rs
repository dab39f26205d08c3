use crate as pallet_equity_token;
use core::{cell::Cell, marker::PhantomData, time::Duration};
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, ConstU64, Get, UnixTime},
    PalletId,
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage,
};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        EquityToken: pallet_equity_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

parameter_types! {
    pub const OwnerAccount: u64 = 1;
    pub const RegistrarAccount: u64 = 9;
    pub const EquityTokenPalletId: PalletId = PalletId(*b"eq/token");
}

/// Admission hash used for accounts admitted in the mock genesis.
pub const GENESIS_HASH: [u8; 32] = [0x80; 32];

/// Origin check that only lets a single signed account through.
pub struct EnsureAccount<Who>(PhantomData<Who>);
impl<Who: Get<u64>> frame_support::traits::EnsureOrigin<RuntimeOrigin> for EnsureAccount<Who> {
    type Success = u64;

    fn try_origin(o: RuntimeOrigin) -> Result<Self::Success, RuntimeOrigin> {
        match o.clone().into() {
            Ok(frame_system::RawOrigin::Signed(account)) if account == Who::get() => Ok(account),
            _ => Err(o),
        }
    }

    #[cfg(feature = "runtime-benchmarks")]
    fn try_successful_origin() -> Result<RuntimeOrigin, ()> {
        Ok(RuntimeOrigin::signed(Who::get()))
    }
}

thread_local! {
    static NOW: Cell<u64> = const { Cell::new(0) };
}

/// Test clock, in unix seconds.
pub struct MockTime;
impl UnixTime for MockTime {
    fn now() -> Duration {
        Duration::from_secs(NOW.with(|now| now.get()))
    }
}

pub fn set_now(secs: u64) {
    NOW.with(|now| now.set(secs));
}

impl pallet_equity_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type AdminOrigin = EnsureAccount<OwnerAccount>;
    type AdmissionOrigin = EnsureAccount<RegistrarAccount>;
    type UnixTime = MockTime;
    type PalletId = EquityTokenPalletId;
    type MaxProofDepth = ConstU32<16>;
    type WeightInfo = ();
}

/// Genesis with accounts 2 and 3 admitted and holding tokens, and both
/// sub-ledgers already under the pallet's control.
pub fn new_test_ext() -> sp_io::TestExternalities {
    build_ext(None)
}

/// Same genesis, but both sub-ledgers start under `custodian`, so the
/// handoff to the pallet still has to happen.
pub fn new_test_ext_with_custodian(custodian: u64) -> sp_io::TestExternalities {
    build_ext(Some(custodian))
}

fn build_ext(ledger_custodian: Option<u64>) -> sp_io::TestExternalities {
    set_now(0);
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_equity_token::GenesisConfig::<Test> {
        token_name: b"Test Equity".to_vec(),
        token_symbol: b"TEQ".to_vec(),
        decimals: 0,
        ledger_custodian,
        admitted: vec![(OwnerAccount::get(), GENESIS_HASH), (2, GENESIS_HASH), (3, GENESIS_HASH)],
        whitelist_root: None,
        locking_period: 0,
        initial_balances: vec![(2, 1_000_000), (3, 500_000)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    t.into()
}
