//! Balance projection over dated, status-tagged instruments.

use rust_decimal::Decimal;
use tracing::warn;

use cheqbook_domain::{
    DateWindow, DayProjection, Displayable, Instrument, KindTotals, ProjectionResult,
};

/// Stateless projection engine that folds instrument snapshots into
/// day-indexed balances.
///
/// Every call is a fresh fold over its own input slice; there is no cache or
/// shared accumulator between calls, so concurrent callers need no
/// coordination.
pub struct ProjectionService;

impl ProjectionService {
    /// Projects the balance for every day in `window`.
    ///
    /// All three settlement statuses participate. Instruments due before the
    /// window seed the running totals, so a window opened mid-stream still
    /// reflects prior obligations. Days without due instruments carry the
    /// previous day's cumulative totals and balance forward unchanged.
    pub fn project(
        anchor_balance: Decimal,
        instruments: &[Instrument],
        window: DateWindow,
    ) -> ProjectionResult {
        let mut eligible = Self::eligible(instruments);
        eligible.sort_by(|a, b| {
            (a.due_date, a.created_date, a.id).cmp(&(b.due_date, b.created_date, b.id))
        });

        let mut cumulative = KindTotals::default();
        let mut remaining = eligible.as_slice();

        // Seed with everything due before the window opens.
        while let Some((first, rest)) = remaining.split_first() {
            if first.due_date >= window.start {
                break;
            }
            cumulative.add(first.kind, first.amount);
            remaining = rest;
        }

        let mut days = Vec::with_capacity(window.len_days() as usize);
        for date in window.iter_days() {
            let mut day_totals = KindTotals::default();
            while let Some((first, rest)) = remaining.split_first() {
                if first.due_date != date {
                    break;
                }
                day_totals.add(first.kind, first.amount);
                cumulative.add(first.kind, first.amount);
                remaining = rest;
            }
            // `cumulative` is copied into the record, so later days cannot
            // retroactively alter earlier ones.
            days.push(DayProjection {
                date,
                day_totals,
                cumulative_totals: cumulative,
                projected_balance: anchor_balance + cumulative.net(),
            });
        }

        ProjectionResult {
            window,
            anchor_balance,
            days,
        }
    }

    /// Settled balance: the anchor plus `cleared` instruments only.
    ///
    /// Deliberately narrower than [`ProjectionService::project`], which also
    /// counts pending and deducted instruments: "current" means settled
    /// money, "projected" means settled-or-in-flight money.
    pub fn current_balance(anchor_balance: Decimal, instruments: &[Instrument]) -> Decimal {
        let mut totals = KindTotals::default();
        for instrument in Self::eligible(instruments) {
            if instrument.status.is_settled() {
                totals.add(instrument.kind, instrument.amount);
            }
        }
        anchor_balance + totals.net()
    }

    /// Drops instruments that fail the `amount > 0` contract, surfacing each
    /// exclusion for caller logging. Every settlement status is eligible.
    fn eligible(instruments: &[Instrument]) -> Vec<&Instrument> {
        instruments
            .iter()
            .filter(|instrument| {
                if !instrument.has_valid_amount() {
                    warn!(
                        "excluding instrument {} from totals: {}",
                        instrument.id,
                        instrument.display_label()
                    );
                    return false;
                }
                true
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cheqbook_domain::{InstrumentKind, InstrumentStatus};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn amount(major: i64) -> Decimal {
        Decimal::new(major * 100, 2)
    }

    fn instrument(
        kind: InstrumentKind,
        status: InstrumentStatus,
        value: i64,
        due: NaiveDate,
    ) -> Instrument {
        Instrument::new(Uuid::new_v4(), kind, amount(value), due, due).with_status(status)
    }

    #[test]
    fn empty_instrument_set_projects_a_flat_line() {
        let window = DateWindow::new(date(2026, 1, 1), date(2026, 1, 5)).unwrap();
        let result = ProjectionService::project(amount(1000), &[], window);
        assert_eq!(result.days.len(), 5);
        for day in &result.days {
            assert!(day.day_totals.is_zero());
            assert!(day.cumulative_totals.is_zero());
            assert_eq!(day.projected_balance, amount(1000));
        }
    }

    #[test]
    fn all_statuses_participate_in_projection() {
        let due = date(2026, 1, 3);
        let instruments = vec![
            instrument(InstrumentKind::Deposit, InstrumentStatus::Pending, 100, due),
            instrument(InstrumentKind::Cheque, InstrumentStatus::Deducted, 40, due),
            instrument(
                InstrumentKind::Withdrawal,
                InstrumentStatus::Cleared,
                10,
                due,
            ),
        ];
        let window = DateWindow::new(date(2026, 1, 1), date(2026, 1, 5)).unwrap();
        let result = ProjectionService::project(amount(0), &instruments, window);
        let day = result.detail_for(due).unwrap();
        assert_eq!(day.day_totals.deposits, amount(100));
        assert_eq!(day.day_totals.cheques, amount(40));
        assert_eq!(day.day_totals.withdrawals, amount(10));
        assert_eq!(day.projected_balance, amount(50));
    }

    #[test]
    fn instruments_before_the_window_seed_every_day() {
        let instruments = vec![instrument(
            InstrumentKind::Cheque,
            InstrumentStatus::Pending,
            250,
            date(2025, 12, 15),
        )];
        let window = DateWindow::new(date(2026, 1, 1), date(2026, 1, 3)).unwrap();
        let result = ProjectionService::project(amount(1000), &instruments, window);
        for day in &result.days {
            assert!(day.day_totals.is_zero());
            assert_eq!(day.cumulative_totals.cheques, amount(250));
            assert_eq!(day.projected_balance, amount(750));
        }
    }

    #[test]
    fn quiet_days_carry_the_previous_balance_forward() {
        let instruments = vec![instrument(
            InstrumentKind::Deposit,
            InstrumentStatus::Pending,
            80,
            date(2026, 1, 2),
        )];
        let window = DateWindow::new(date(2026, 1, 1), date(2026, 1, 6)).unwrap();
        let result = ProjectionService::project(amount(500), &instruments, window);
        for pair in result.days.windows(2) {
            if pair[1].day_totals.is_zero() {
                assert_eq!(pair[1].projected_balance, pair[0].projected_balance);
                assert_eq!(pair[1].cumulative_totals, pair[0].cumulative_totals);
            }
        }
        assert_eq!(result.closing_balance(), amount(580));
    }

    #[test]
    fn duplicate_instruments_on_one_day_all_stack() {
        let due = date(2026, 1, 2);
        let instruments = vec![
            instrument(InstrumentKind::Cheque, InstrumentStatus::Pending, 25, due),
            instrument(InstrumentKind::Cheque, InstrumentStatus::Pending, 25, due),
            instrument(InstrumentKind::Cheque, InstrumentStatus::Pending, 25, due),
        ];
        let window = DateWindow::single(due);
        let result = ProjectionService::project(amount(100), &instruments, window);
        assert_eq!(result.days[0].day_totals.cheques, amount(75));
        assert_eq!(result.days[0].projected_balance, amount(25));
    }

    #[test]
    fn non_positive_amounts_are_excluded_from_totals() {
        let due = date(2026, 1, 2);
        let mut bad = instrument(InstrumentKind::Deposit, InstrumentStatus::Cleared, 1, due);
        bad.amount = Decimal::ZERO;
        let good = instrument(InstrumentKind::Deposit, InstrumentStatus::Cleared, 10, due);
        let result =
            ProjectionService::project(amount(0), &[bad.clone(), good], DateWindow::single(due));
        assert_eq!(result.days[0].day_totals.deposits, amount(10));
        assert_eq!(
            ProjectionService::current_balance(amount(0), &[bad]),
            amount(0)
        );
    }

    #[test]
    fn current_balance_counts_only_cleared_instruments() {
        let due = date(2026, 1, 10);
        let instruments = vec![
            instrument(InstrumentKind::Deposit, InstrumentStatus::Cleared, 300, due),
            instrument(InstrumentKind::Deposit, InstrumentStatus::Pending, 200, due),
            instrument(InstrumentKind::Cheque, InstrumentStatus::Cleared, 125, due),
            instrument(
                InstrumentKind::Withdrawal,
                InstrumentStatus::Deducted,
                50,
                due,
            ),
        ];
        assert_eq!(
            ProjectionService::current_balance(amount(1000), &instruments),
            amount(1175)
        );
    }

    #[test]
    fn changing_a_non_cleared_amount_leaves_current_balance_alone() {
        let due = date(2026, 1, 10);
        let mut instruments = vec![
            instrument(InstrumentKind::Deposit, InstrumentStatus::Cleared, 300, due),
            instrument(InstrumentKind::Cheque, InstrumentStatus::Pending, 40, due),
        ];
        let before = ProjectionService::current_balance(amount(1000), &instruments);
        instruments[1].amount = amount(9999);
        let after = ProjectionService::current_balance(amount(1000), &instruments);
        assert_eq!(before, after);
    }
}
