//! Reporting aggregates consumed by export and presentation collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::instrument::InstrumentStatus;
use crate::projection::KindTotals;

/// Totals for one calendar month of due instruments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub totals: KindTotals,
    pub net: Decimal,
    pub instrument_count: usize,
}

/// Register-wide totals split by settlement status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub pending: KindTotals,
    pub deducted: KindTotals,
    pub cleared: KindTotals,
}

impl StatusBreakdown {
    pub fn bucket(&self, status: InstrumentStatus) -> &KindTotals {
        match status {
            InstrumentStatus::Pending => &self.pending,
            InstrumentStatus::Deducted => &self.deducted,
            InstrumentStatus::Cleared => &self.cleared,
        }
    }

    pub fn bucket_mut(&mut self, status: InstrumentStatus) -> &mut KindTotals {
        match status {
            InstrumentStatus::Pending => &mut self.pending,
            InstrumentStatus::Deducted => &mut self.deducted,
            InstrumentStatus::Cleared => &mut self.cleared,
        }
    }

    /// Inflow-minus-outflow across every status bucket.
    pub fn net(&self) -> Decimal {
        self.pending.net() + self.deducted.net() + self.cleared.net()
    }
}
