//! Classifies transactions by due-date proximity and ranks them by urgency.
//!
//! Every function here is pure: "today" is always passed in by the caller and
//! is normalized to whole calendar days, so results are reproducible in tests
//! and independent of wall-clock time.

use time::Date;

use crate::models::{Transaction, TransactionKind};

/// The minimum urgency score a transaction must reach before it is surfaced
/// to the user as the critical priority.
///
/// Guards against noise when every obligation is low priority. The
/// notification set in [urgent_transactions] is independent of this
/// threshold.
pub const PRIORITY_SURFACE_THRESHOLD: i64 = 100;

/// Whether a due date falls today or within the next 7 calendar days
/// (inclusive).
///
/// Returns false when there is no due date. An overdue date is never "due
/// soon"; [is_due_soon] and [is_overdue] are mutually exclusive.
pub fn is_due_soon(due_date: Option<Date>, today: Date) -> bool {
    match due_date {
        Some(due) => (0..=7).contains(&(due - today).whole_days()),
        None => false,
    }
}

/// Whether a due date is strictly before today.
///
/// Returns false when there is no due date.
pub fn is_overdue(due_date: Option<Date>, today: Date) -> bool {
    match due_date {
        Some(due) => due < today,
        None => false,
    }
}

/// A relative, unit-less ranking number combining type, due-date proximity,
/// and amount.
///
/// The score is additive:
/// - base: 100 for a debt, 50 for a credit (the user's own debts weigh more
///   than money owed to them);
/// - due-date term: -50 with no due date, +500 overdue, +300 due within a
///   day, +150 within a week, +20 within 30 days, +0 beyond;
/// - amount term: amount / 10, linear and unbounded;
/// - +10 while the transaction is not cleared.
///
/// The result is rounded to the nearest integer and has no absolute meaning;
/// only comparisons between scores are meaningful.
pub fn urgency_score(transaction: &Transaction, today: Date) -> i64 {
    let mut score: f64 = match transaction.kind() {
        TransactionKind::Debt => 100.0,
        TransactionKind::Credit => 50.0,
    };

    match transaction.due_date() {
        None => score -= 50.0,
        Some(due) => {
            score += match (due - today).whole_days() {
                days if days < 0 => 500.0,
                0..=1 => 300.0,
                2..=7 => 150.0,
                8..=30 => 20.0,
                _ => 0.0,
            };
        }
    }

    score += transaction.amount() / 10.0;

    if !transaction.cleared() {
        score += 10.0;
    }

    score.round() as i64
}

/// The single highest-scoring uncleared transaction, with its score.
///
/// Ties go to the first item seen, so the input order must be stable for
/// reproducible results. Returns `None` when every transaction is cleared.
pub fn top_priority(transactions: &[Transaction], today: Date) -> Option<(&Transaction, i64)> {
    let mut best: Option<(&Transaction, i64)> = None;

    for transaction in transactions.iter().filter(|t| !t.cleared()) {
        let score = urgency_score(transaction, today);

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((transaction, score));
        }
    }

    best
}

/// Like [top_priority], but only surfaces results at or above
/// [PRIORITY_SURFACE_THRESHOLD].
pub fn critical_priority(transactions: &[Transaction], today: Date) -> Option<(&Transaction, i64)> {
    top_priority(transactions, today).filter(|(_, score)| *score >= PRIORITY_SURFACE_THRESHOLD)
}

/// The set of transactions to alert the user about: everything uncleared that
/// is either due soon or overdue.
///
/// This is a plain predicate filter over the input order, independent of the
/// urgency score and its surfacing threshold.
pub fn urgent_transactions(transactions: &[Transaction], today: Date) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            !transaction.cleared()
                && (is_due_soon(transaction.due_date(), today)
                    || is_overdue(transaction.due_date(), today))
        })
        .collect()
}
