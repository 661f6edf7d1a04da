//! Abstraction over instrument persistence backends.

use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use cheqbook_domain::{Identifiable, Instrument, StatusUpdate};

use crate::error::CoreError;

/// Persistence contract the engines require from a backend.
///
/// `apply_status_updates` must only touch rows still `pending`; that
/// precondition is what keeps concurrent or repeated sweeps commutative
/// without any locking at the engine layer.
pub trait InstrumentStore: Send + Sync {
    /// Returns the instrument snapshot, optionally scoped to one account.
    fn list_instruments(&self, account_id: Option<Uuid>) -> Result<Vec<Instrument>, CoreError>;

    /// Applies the updates to rows still pending, returning how many changed.
    fn apply_status_updates(&self, updates: &[StatusUpdate]) -> Result<usize, CoreError>;
}

/// In-memory store used by tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryInstrumentStore {
    instruments: Mutex<Vec<Instrument>>,
}

impl MemoryInstrumentStore {
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self {
            instruments: Mutex::new(instruments),
        }
    }

    /// Inserts or replaces an instrument by id.
    ///
    /// Producers own the `amount > 0` contract, so the write path is where
    /// it is enforced; the read-side engines only exclude and log.
    pub fn upsert(&self, instrument: Instrument) -> Result<(), CoreError> {
        if !instrument.has_valid_amount() {
            return Err(CoreError::Validation(format!(
                "instrument amount must be positive, got {}",
                instrument.amount
            )));
        }
        let mut rows = self.rows();
        match rows.iter_mut().find(|row| row.id() == instrument.id()) {
            Some(row) => *row = instrument,
            None => rows.push(instrument),
        }
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<Instrument> {
        self.rows().iter().find(|row| row.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    fn rows(&self) -> MutexGuard<'_, Vec<Instrument>> {
        self.instruments
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl InstrumentStore for MemoryInstrumentStore {
    fn list_instruments(&self, account_id: Option<Uuid>) -> Result<Vec<Instrument>, CoreError> {
        let rows = self.rows();
        Ok(rows
            .iter()
            .filter(|row| account_id.map_or(true, |account| row.account_id == account))
            .cloned()
            .collect())
    }

    fn apply_status_updates(&self, updates: &[StatusUpdate]) -> Result<usize, CoreError> {
        let mut rows = self.rows();
        let mut applied = 0;
        for update in updates {
            let row = rows.iter_mut().find(|row| row.id() == update.id);
            if let Some(row) = row {
                if row.is_pending() {
                    row.status = update.new_status;
                    applied += 1;
                }
            }
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cheqbook_domain::{InstrumentKind, InstrumentStatus};
    use rust_decimal::Decimal;

    fn instrument(account_id: Uuid) -> Instrument {
        let due = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        Instrument::new(
            account_id,
            InstrumentKind::Cheque,
            Decimal::new(5000, 2),
            due,
            due,
        )
    }

    #[test]
    fn listing_scopes_to_the_requested_account() {
        let account = Uuid::new_v4();
        let other = Uuid::new_v4();
        let store =
            MemoryInstrumentStore::new(vec![instrument(account), instrument(other)]);
        assert_eq!(store.list_instruments(None).unwrap().len(), 2);
        let scoped = store.list_instruments(Some(account)).unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].account_id, account);
    }

    #[test]
    fn updates_skip_rows_no_longer_pending() {
        let account = Uuid::new_v4();
        let pending = instrument(account);
        let settled = instrument(account).with_status(InstrumentStatus::Cleared);
        let updates = vec![
            StatusUpdate {
                id: pending.id,
                new_status: InstrumentStatus::Deducted,
            },
            StatusUpdate {
                id: settled.id,
                new_status: InstrumentStatus::Deducted,
            },
        ];
        let store = MemoryInstrumentStore::new(vec![pending.clone(), settled.clone()]);
        let applied = store.apply_status_updates(&updates).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(
            store.get(pending.id).unwrap().status,
            InstrumentStatus::Deducted
        );
        assert_eq!(
            store.get(settled.id).unwrap().status,
            InstrumentStatus::Cleared
        );
    }

    #[test]
    fn upsert_replaces_existing_rows() {
        let account = Uuid::new_v4();
        let mut row = instrument(account);
        let store = MemoryInstrumentStore::new(vec![row.clone()]);
        row.amount = Decimal::new(7500, 2);
        store.upsert(row.clone()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(row.id).unwrap().amount, Decimal::new(7500, 2));
    }

    #[test]
    fn upsert_rejects_non_positive_amounts() {
        let store = MemoryInstrumentStore::default();
        let mut row = instrument(Uuid::new_v4());
        row.amount = Decimal::ZERO;
        let err = store.upsert(row).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(store.is_empty());
    }
}
