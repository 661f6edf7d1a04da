//! Day-indexed projection output produced by the balance engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::instrument::InstrumentKind;
use crate::window::DateWindow;

/// Aggregated amounts split by instrument kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KindTotals {
    pub deposits: Decimal,
    pub cheques: Decimal,
    pub withdrawals: Decimal,
}

impl KindTotals {
    /// Folds one amount into the bucket for its kind.
    pub fn add(&mut self, kind: InstrumentKind, amount: Decimal) {
        match kind {
            InstrumentKind::Deposit => self.deposits += amount,
            InstrumentKind::Cheque => self.cheques += amount,
            InstrumentKind::Withdrawal => self.withdrawals += amount,
        }
    }

    /// Inflows minus outflows.
    pub fn net(&self) -> Decimal {
        self.deposits - self.cheques - self.withdrawals
    }

    pub fn is_zero(&self) -> bool {
        self.deposits.is_zero() && self.cheques.is_zero() && self.withdrawals.is_zero()
    }
}

/// One date's aggregated totals and resulting projected balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayProjection {
    pub date: NaiveDate,
    pub day_totals: KindTotals,
    pub cumulative_totals: KindTotals,
    pub projected_balance: Decimal,
}

/// Ordered per-day projection for a window, echoing back the inputs the
/// projection was computed against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionResult {
    pub window: DateWindow,
    pub anchor_balance: Decimal,
    pub days: Vec<DayProjection>,
}

impl ProjectionResult {
    /// Point lookup for a single date.
    ///
    /// The day walk emits exactly one record per date, so the offset from
    /// `window.start` is the index. Dates outside the window return `None`
    /// rather than an extrapolated value.
    pub fn detail_for(&self, date: NaiveDate) -> Option<&DayProjection> {
        if !self.window.contains(date) {
            return None;
        }
        let offset = (date - self.window.start).num_days() as usize;
        self.days.get(offset)
    }

    /// Balance at the end of the window, or the anchor for an empty result.
    pub fn closing_balance(&self) -> Decimal {
        self.days
            .last()
            .map(|day| day.projected_balance)
            .unwrap_or(self.anchor_balance)
    }
}
