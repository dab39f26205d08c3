//! Two-phase custody of the sub-ledgers.
//!
//! Each sub-ledger has a controller and at most one pending nominee. Only the
//! controller may write to the ledger or nominate a successor, and the nominee
//! gains nothing until it accepts.

use frame_support::{dispatch::DispatchResult, ensure};
use sp_std::marker::PhantomData;

use crate::{Config, Error, LedgerControllers, LedgerKind, PendingLedgerControllers};

/// Access-control component shared by [`crate::ledger::BalanceLedger`] and
/// [`crate::ledger::AllowanceLedger`].
pub struct Custody<T>(PhantomData<T>);

impl<T: Config> Custody<T> {
    pub fn controller(ledger: LedgerKind) -> Option<T::AccountId> {
        LedgerControllers::<T>::get(ledger)
    }

    pub fn pending(ledger: LedgerKind) -> Option<T::AccountId> {
        PendingLedgerControllers::<T>::get(ledger)
    }

    /// Fails unless `who` currently controls `ledger`.
    ///
    /// A nominee that has not yet accepted gets `ControlNotAccepted` so callers
    /// can tell an unfinished handoff apart from a plain privilege failure.
    pub fn ensure_controller(ledger: LedgerKind, who: &T::AccountId) -> DispatchResult {
        if Self::controller(ledger).as_ref() == Some(who) {
            return Ok(());
        }
        if Self::pending(ledger).as_ref() == Some(who) {
            return Err(Error::<T>::ControlNotAccepted.into());
        }
        Err(Error::<T>::Unauthorized.into())
    }

    /// Current controller names `candidate` as its successor, replacing any
    /// earlier nomination.
    pub fn nominate(
        ledger: LedgerKind,
        caller: &T::AccountId,
        candidate: T::AccountId,
    ) -> DispatchResult {
        ensure!(Self::controller(ledger).as_ref() == Some(caller), Error::<T>::Unauthorized);
        PendingLedgerControllers::<T>::insert(ledger, candidate);
        Ok(())
    }

    /// Pending nominee takes control. Returns the previous controller.
    pub fn accept(
        ledger: LedgerKind,
        caller: &T::AccountId,
    ) -> Result<Option<T::AccountId>, Error<T>> {
        ensure!(Self::pending(ledger).as_ref() == Some(caller), Error::<T>::Unauthorized);
        PendingLedgerControllers::<T>::remove(ledger);
        Ok(LedgerControllers::<T>::mutate(ledger, |c| c.replace(caller.clone())))
    }
}
