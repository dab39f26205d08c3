//! Balance and allowance sheets.
//!
//! Reads are open to everyone. Every write names the caller and is refused
//! unless the caller controls the sheet (see [`Custody`]). In a configured
//! chain the controller is the pallet's own account once custody has been
//! handed over.

use frame_support::{dispatch::DispatchResult, ensure};
use sp_std::marker::PhantomData;

use crate::{custody::Custody, Allowances, Balances, Config, Error, LedgerKind};

pub struct BalanceLedger<T>(PhantomData<T>);

impl<T: Config> BalanceLedger<T> {
    pub fn balance_of(who: &T::AccountId) -> u128 {
        Balances::<T>::get(who)
    }

    pub fn set_balance(caller: &T::AccountId, who: &T::AccountId, amount: u128) -> DispatchResult {
        Custody::<T>::ensure_controller(LedgerKind::Balances, caller)?;
        Balances::<T>::insert(who, amount);
        Ok(())
    }

    pub fn add_balance(caller: &T::AccountId, who: &T::AccountId, delta: u128) -> DispatchResult {
        Custody::<T>::ensure_controller(LedgerKind::Balances, caller)?;
        Balances::<T>::try_mutate(who, |bal| -> DispatchResult {
            *bal = bal.checked_add(delta).ok_or(Error::<T>::Overflow)?;
            Ok(())
        })
    }

    pub fn sub_balance(caller: &T::AccountId, who: &T::AccountId, delta: u128) -> DispatchResult {
        Custody::<T>::ensure_controller(LedgerKind::Balances, caller)?;
        Balances::<T>::try_mutate(who, |bal| -> DispatchResult {
            ensure!(*bal >= delta, Error::<T>::InsufficientBalance);
            *bal -= delta;
            Ok(())
        })
    }
}

pub struct AllowanceLedger<T>(PhantomData<T>);

impl<T: Config> AllowanceLedger<T> {
    pub fn allowance_of(owner: &T::AccountId, spender: &T::AccountId) -> u128 {
        Allowances::<T>::get(owner, spender)
    }

    pub fn set_allowance(
        caller: &T::AccountId,
        owner: &T::AccountId,
        spender: &T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        Custody::<T>::ensure_controller(LedgerKind::Allowances, caller)?;
        Allowances::<T>::insert(owner, spender, amount);
        Ok(())
    }

    pub fn add_allowance(
        caller: &T::AccountId,
        owner: &T::AccountId,
        spender: &T::AccountId,
        delta: u128,
    ) -> DispatchResult {
        Custody::<T>::ensure_controller(LedgerKind::Allowances, caller)?;
        Allowances::<T>::try_mutate(owner, spender, |allowance| -> DispatchResult {
            *allowance = allowance.checked_add(delta).ok_or(Error::<T>::Overflow)?;
            Ok(())
        })
    }

    pub fn sub_allowance(
        caller: &T::AccountId,
        owner: &T::AccountId,
        spender: &T::AccountId,
        delta: u128,
    ) -> DispatchResult {
        Custody::<T>::ensure_controller(LedgerKind::Allowances, caller)?;
        Allowances::<T>::try_mutate(owner, spender, |allowance| -> DispatchResult {
            ensure!(*allowance >= delta, Error::<T>::InsufficientAllowance);
            *allowance -= delta;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::*;
    use frame_support::{assert_noop, assert_ok};

    #[test]
    fn orchestrator_controls_both_ledgers_by_default() {
        new_test_ext().execute_with(|| {
            let me = EquityToken::orchestrator_account();
            assert_ok!(BalanceLedger::<Test>::set_balance(&me, &40, 10));
            assert_ok!(BalanceLedger::<Test>::add_balance(&me, &40, 5));
            assert_ok!(BalanceLedger::<Test>::sub_balance(&me, &40, 3));
            assert_eq!(BalanceLedger::<Test>::balance_of(&40), 12);

            assert_ok!(AllowanceLedger::<Test>::set_allowance(&me, &40, &41, 7));
            assert_ok!(AllowanceLedger::<Test>::add_allowance(&me, &40, &41, 3));
            assert_ok!(AllowanceLedger::<Test>::sub_allowance(&me, &40, &41, 10));
            assert_eq!(AllowanceLedger::<Test>::allowance_of(&40, &41), 0);
        });
    }

    #[test]
    fn writes_from_non_controller_are_refused() {
        new_test_ext().execute_with(|| {
            assert_noop!(
                BalanceLedger::<Test>::add_balance(&2, &2, 1),
                Error::<Test>::Unauthorized
            );
            assert_noop!(
                AllowanceLedger::<Test>::set_allowance(&2, &2, &3, 1),
                Error::<Test>::Unauthorized
            );
        });
    }

    #[test]
    fn over_decrement_is_refused() {
        new_test_ext().execute_with(|| {
            let me = EquityToken::orchestrator_account();
            assert_ok!(BalanceLedger::<Test>::set_balance(&me, &40, 5));
            assert_noop!(
                BalanceLedger::<Test>::sub_balance(&me, &40, 6),
                Error::<Test>::InsufficientBalance
            );
            assert_noop!(
                AllowanceLedger::<Test>::sub_allowance(&me, &40, &41, 1),
                Error::<Test>::InsufficientAllowance
            );
        });
    }

    #[test]
    fn additions_are_overflow_checked() {
        new_test_ext().execute_with(|| {
            let me = EquityToken::orchestrator_account();
            assert_ok!(BalanceLedger::<Test>::set_balance(&me, &40, u128::MAX));
            assert_noop!(BalanceLedger::<Test>::add_balance(&me, &40, 1), Error::<Test>::Overflow);
        });
    }
}
