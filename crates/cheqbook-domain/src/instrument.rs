//! Domain models for monetary instruments and their settlement lifecycle.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable};

/// A single dated promise of money movement against an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instrument {
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: InstrumentKind,
    pub amount: Decimal,
    pub status: InstrumentStatus,
    pub due_date: NaiveDate,
    pub created_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Instrument {
    pub fn new(
        account_id: Uuid,
        kind: InstrumentKind,
        amount: Decimal,
        due_date: NaiveDate,
        created_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            kind,
            amount,
            status: InstrumentStatus::Pending,
            due_date,
            created_date,
            payee: None,
            description: None,
            reference: None,
        }
    }

    pub fn with_status(mut self, status: InstrumentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    /// Whether the amount satisfies the producer-side `amount > 0` contract.
    pub fn has_valid_amount(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, InstrumentStatus::Pending)
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == date
    }
}

impl Identifiable for Instrument {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Instrument {
    fn display_label(&self) -> String {
        format!(
            "{} {} due {} [{}]",
            self.kind, self.amount, self.due_date, self.status
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Enumerates the kinds of instrument a register tracks.
pub enum InstrumentKind {
    Deposit,
    Cheque,
    Withdrawal,
}

impl InstrumentKind {
    /// Terminal status this kind settles into once its due date arrives.
    pub fn settled_status(self) -> InstrumentStatus {
        match self {
            InstrumentKind::Deposit => InstrumentStatus::Cleared,
            InstrumentKind::Cheque | InstrumentKind::Withdrawal => InstrumentStatus::Deducted,
        }
    }

    /// Deposits add to a balance; cheques and withdrawals subtract from it.
    pub fn is_inflow(self) -> bool {
        matches!(self, InstrumentKind::Deposit)
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstrumentKind::Deposit => "Deposit",
            InstrumentKind::Cheque => "Cheque",
            InstrumentKind::Withdrawal => "Withdrawal",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Enumerates the settlement lifecycle of an instrument.
pub enum InstrumentStatus {
    Pending,
    Deducted,
    Cleared,
}

impl InstrumentStatus {
    /// `Deducted` and `Cleared` accept no further automated transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, InstrumentStatus::Pending)
    }

    /// Statuses that count toward the settled ("current") balance.
    pub fn is_settled(self) -> bool {
        matches!(self, InstrumentStatus::Cleared)
    }
}

impl fmt::Display for InstrumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstrumentStatus::Pending => "Pending",
            InstrumentStatus::Deducted => "Deducted",
            InstrumentStatus::Cleared => "Cleared",
        };
        f.write_str(label)
    }
}

/// Replacement status for a single instrument, keyed by id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    pub id: Uuid,
    pub new_status: InstrumentStatus,
}

/// Result of a due-date settlement sweep, with per-kind counts for
/// observability.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub updates: Vec<StatusUpdate>,
    pub cleared_deposits: usize,
    pub deducted_cheques: usize,
    pub deducted_withdrawals: usize,
}

impl TransitionOutcome {
    pub fn total(&self) -> usize {
        self.updates.len()
    }

    pub fn is_noop(&self) -> bool {
        self.updates.is_empty()
    }
}
