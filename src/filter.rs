//! Search and filter predicates over the ledger.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    models::{Transaction, TransactionKind},
    urgency::{is_due_soon, is_overdue},
};

/// A status facet for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Uncleared transactions.
    Active,
    /// Cleared transactions.
    Settled,
    /// Uncleared transactions with a due date in the past.
    Overdue,
    /// Uncleared transactions due within the next 7 days.
    DueSoon,
}

/// Defines which transactions to keep. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Keep only credits or only debts.
    pub kind: Option<TransactionKind>,
    /// Keep only transactions in the given status.
    pub status: Option<StatusFilter>,
    /// Case-insensitive text search over name, contact, and note.
    pub query: Option<String>,
    /// Keep amounts at or above this value.
    pub min_amount: Option<f64>,
    /// Keep amounts at or below this value.
    pub max_amount: Option<f64>,
    /// Keep due dates within this range. Undated transactions never match.
    pub due_range: Option<RangeInclusive<Date>>,
}

impl TransactionFilter {
    /// Whether a transaction passes every set facet.
    pub fn matches(&self, transaction: &Transaction, today: Date) -> bool {
        if let Some(kind) = self.kind {
            if transaction.kind() != kind {
                return false;
            }
        }

        if let Some(status) = self.status {
            let passes = match status {
                StatusFilter::Active => !transaction.cleared(),
                StatusFilter::Settled => transaction.cleared(),
                StatusFilter::Overdue => {
                    !transaction.cleared() && is_overdue(transaction.due_date(), today)
                }
                StatusFilter::DueSoon => {
                    !transaction.cleared() && is_due_soon(transaction.due_date(), today)
                }
            };

            if !passes {
                return false;
            }
        }

        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let haystacks = [
                Some(transaction.name()),
                transaction.contact(),
                transaction.note(),
            ];

            let found = haystacks
                .iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&query));

            if !found {
                return false;
            }
        }

        if let Some(min_amount) = self.min_amount {
            if transaction.amount() < min_amount {
                return false;
            }
        }

        if let Some(max_amount) = self.max_amount {
            if transaction.amount() > max_amount {
                return false;
            }
        }

        if let Some(due_range) = &self.due_range {
            match transaction.due_date() {
                Some(due_date) if due_range.contains(&due_date) => {}
                _ => return false,
            }
        }

        true
    }

    /// Keep the transactions passing the filter, preserving input order.
    pub fn apply<'a>(
        &self,
        transactions: &'a [Transaction],
        today: Date,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|transaction| self.matches(transaction, today))
            .collect()
    }
}
