//! Grouping aggregates for export and reporting collaborators.

use std::collections::BTreeMap;

use chrono::Datelike;
use tracing::warn;

use cheqbook_domain::{Displayable, Instrument, KindTotals, MonthlySummary, StatusBreakdown};

/// Stateless reporting helpers that reuse the projection's kind/status
/// split rather than re-deriving their own aggregation rules.
pub struct SummaryService;

impl SummaryService {
    /// Groups instruments into per-month totals by due date, oldest first.
    pub fn monthly_breakdown(instruments: &[Instrument]) -> Vec<MonthlySummary> {
        let mut months: BTreeMap<(i32, u32), (KindTotals, usize)> = BTreeMap::new();
        for instrument in instruments {
            if !instrument.has_valid_amount() {
                warn!(
                    "excluding instrument {} from monthly breakdown: {}",
                    instrument.id,
                    instrument.display_label()
                );
                continue;
            }
            let key = (instrument.due_date.year(), instrument.due_date.month());
            let entry = months.entry(key).or_default();
            entry.0.add(instrument.kind, instrument.amount);
            entry.1 += 1;
        }
        months
            .into_iter()
            .map(|((year, month), (totals, instrument_count))| MonthlySummary {
                year,
                month,
                net: totals.net(),
                totals,
                instrument_count,
            })
            .collect()
    }

    /// Splits register-wide totals by settlement status.
    pub fn status_breakdown(instruments: &[Instrument]) -> StatusBreakdown {
        let mut breakdown = StatusBreakdown::default();
        for instrument in instruments {
            if !instrument.has_valid_amount() {
                warn!(
                    "excluding instrument {} from status breakdown: {}",
                    instrument.id,
                    instrument.display_label()
                );
                continue;
            }
            breakdown
                .bucket_mut(instrument.status)
                .add(instrument.kind, instrument.amount);
        }
        breakdown
    }
}
