//! Due-date settlement sweep for pending instruments.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, info};

use cheqbook_domain::{Instrument, InstrumentKind, StatusUpdate, TransitionOutcome};

use crate::{error::CoreError, storage::InstrumentStore, time::Clock};

/// Advances pending instruments into their terminal settlement status once
/// their due date arrives in the caller's timezone.
///
/// The selection precondition (`status == pending`) makes the sweep
/// idempotent: re-running it for the same local date changes nothing.
pub struct TransitionService;

impl TransitionService {
    /// Computes the transitions due on `local_today`.
    ///
    /// Pending deposits due today clear; pending cheques and withdrawals due
    /// today deduct. Instruments with another status or date pass through
    /// untouched.
    pub fn due_transitions(
        instruments: &[Instrument],
        local_today: NaiveDate,
    ) -> TransitionOutcome {
        let mut outcome = TransitionOutcome::default();
        for instrument in instruments {
            if !instrument.is_pending() || !instrument.is_due_on(local_today) {
                continue;
            }
            match instrument.kind {
                InstrumentKind::Deposit => outcome.cleared_deposits += 1,
                InstrumentKind::Cheque => outcome.deducted_cheques += 1,
                InstrumentKind::Withdrawal => outcome.deducted_withdrawals += 1,
            }
            outcome.updates.push(StatusUpdate {
                id: instrument.id,
                new_status: instrument.kind.settled_status(),
            });
        }
        outcome
    }

    /// Applies the due transitions directly to an in-memory snapshot.
    pub fn settle_snapshot(
        instruments: &mut [Instrument],
        local_today: NaiveDate,
    ) -> TransitionOutcome {
        let outcome = Self::due_transitions(instruments, local_today);
        for update in &outcome.updates {
            if let Some(row) = instruments.iter_mut().find(|row| row.id == update.id) {
                row.status = update.new_status;
            }
        }
        outcome
    }

    /// Runs a full sweep against a store: list, compute, persist.
    ///
    /// Safe to invoke at any frequency (cron, page load, on demand); the
    /// store's pending-only application keeps racing sweeps commutative.
    pub fn run_sweep(
        store: &dyn InstrumentStore,
        clock: &dyn Clock,
        timezone: Tz,
    ) -> Result<TransitionOutcome, CoreError> {
        let local_today = clock.today_in(timezone);
        let instruments = store.list_instruments(None)?;
        let outcome = Self::due_transitions(&instruments, local_today);
        if outcome.is_noop() {
            debug!("no instruments due on {}", local_today);
            return Ok(outcome);
        }
        let applied = store.apply_status_updates(&outcome.updates)?;
        info!(
            "settled {} instrument(s) due {}: {} cleared, {} deducted",
            applied,
            local_today,
            outcome.cleared_deposits,
            outcome.deducted_cheques + outcome.deducted_withdrawals
        );
        Ok(outcome)
    }
}
