//! Recurring templates: rules that periodically materialize new transactions.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::TransactionKind;

/// Alias for the integer type used for recurring template IDs.
pub type RecurringId = i64;

/// How often a recurring template produces a new transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every day.
    Daily,
    /// Every 7 days.
    Weekly,
    /// Every 14 days.
    Biweekly,
    /// Every calendar month.
    Monthly,
    /// Every 3 calendar months.
    Quarterly,
    /// Every 6 calendar months.
    Semiannually,
    /// Every year.
    Annually,
}

impl Frequency {
    /// The display name for the frequency.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Bi-weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Semiannually => "Semi-annually",
            Frequency::Annually => "Annually",
        }
    }
}

/// A rough category for a recurring template, used for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringCategory {
    /// Regular income.
    Salary,
    /// Rent or mortgage.
    Rent,
    /// Power, water, internet, and similar.
    Utilities,
    /// Recurring subscriptions.
    Subscription,
    /// Insurance premiums.
    Insurance,
    /// Loan repayments.
    Loan,
    /// Anything else.
    Other,
}

/// A rule that periodically materializes new [Transactions](crate::models::Transaction)
/// on a schedule.
///
/// Templates are created by explicit user action and mutated only by the
/// rollforward engine (advancing `next_due_date` / `last_generated_date`
/// through [crate::stores::RecurringStore::advance]) or by explicit toggling
/// of `active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    /// The ID of the template.
    pub id: RecurringId,
    /// Whether materialized transactions are credits or debts.
    pub kind: TransactionKind,
    /// The name materialized transactions are derived from.
    pub name: String,
    /// The amount of each materialized transaction.
    pub amount: f64,
    /// Contact details carried onto materialized transactions.
    pub contact: Option<String>,
    /// Display category.
    pub category: RecurringCategory,
    /// How often a new occurrence is due.
    pub frequency: Frequency,
    /// The next occurrence to materialize.
    pub next_due_date: Date,
    /// The due date for which a concrete transaction was most recently
    /// created from this template. Always at or before the `next_due_date`
    /// that was current at generation time.
    pub last_generated_date: Option<Date>,
    /// Inactive templates are never rolled forward.
    pub active: bool,
    /// When false the template is skipped by the rollforward engine entirely
    /// and occurrences are only ever created manually.
    pub auto_create_transaction: bool,
}

impl RecurringTransaction {
    /// Create an active template with auto-creation enabled and no
    /// generation history.
    ///
    /// The ID is assigned by the store on creation.
    pub fn new(
        kind: TransactionKind,
        name: String,
        amount: f64,
        frequency: Frequency,
        next_due_date: Date,
    ) -> Self {
        Self {
            id: 0,
            kind,
            name,
            amount,
            contact: None,
            category: RecurringCategory::Other,
            frequency,
            next_due_date,
            last_generated_date: None,
            active: true,
            auto_create_transaction: true,
        }
    }
}
