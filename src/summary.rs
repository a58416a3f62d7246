//! Aggregates the ledger into the headline figures shown on the dashboard.

use time::Date;

use crate::{
    models::{Transaction, TransactionKind},
    urgency::is_due_soon,
};

/// Headline totals over a ledger of transactions.
///
/// All money figures sum the *remaining* balances of uncleared transactions;
/// settled items only contribute to `settled_count`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerSummary {
    /// Outstanding money owed to the user.
    pub outstanding_credit: f64,
    /// Outstanding money the user owes.
    pub outstanding_debt: f64,
    /// `outstanding_credit - outstanding_debt`; positive means the user is
    /// owed more than they owe.
    pub net_position: f64,
    /// Outstanding balance across uncleared transactions due within the next
    /// 7 days (inclusive of today).
    pub due_soon_amount: f64,
    /// Number of uncleared transactions.
    pub active_count: usize,
    /// Number of settled transactions.
    pub settled_count: usize,
}

/// Compute the ledger summary for display.
pub fn summarize(transactions: &[Transaction], today: Date) -> LedgerSummary {
    let mut summary = LedgerSummary::default();

    for transaction in transactions {
        if transaction.cleared() {
            summary.settled_count += 1;
            continue;
        }

        summary.active_count += 1;

        match transaction.kind() {
            TransactionKind::Credit => summary.outstanding_credit += transaction.remaining(),
            TransactionKind::Debt => summary.outstanding_debt += transaction.remaining(),
        }

        if is_due_soon(transaction.due_date(), today) {
            summary.due_soon_amount += transaction.remaining();
        }
    }

    summary.net_position = summary.outstanding_credit - summary.outstanding_debt;

    summary
}

#[cfg(test)]
mod summary_tests {
    use time::{Duration, macros::date};

    use crate::models::{Payment, Transaction, TransactionKind};

    use super::summarize;

    const TODAY: time::Date = date!(2026 - 08 - 26);

    #[test]
    fn empty_ledger_is_all_zero() {
        let summary = summarize(&[], TODAY);

        assert_eq!(summary.outstanding_credit, 0.0);
        assert_eq!(summary.outstanding_debt, 0.0);
        assert_eq!(summary.net_position, 0.0);
        assert_eq!(summary.active_count, 0);
        assert_eq!(summary.settled_count, 0);
    }

    #[test]
    fn sums_remaining_not_face_amounts() {
        let mut debt = Transaction::build(TransactionKind::Debt, "Rent".to_string(), 1000.0)
            .finalise(1, TODAY);
        debt.record_payment(Payment {
            amount: 300.0,
            date: TODAY,
            note: None,
        });

        let credit = Transaction::build(TransactionKind::Credit, "Sam".to_string(), 500.0)
            .finalise(2, TODAY);

        let summary = summarize(&[debt, credit], TODAY);

        assert_eq!(summary.outstanding_debt, 700.0);
        assert_eq!(summary.outstanding_credit, 500.0);
        assert_eq!(summary.net_position, -200.0);
        assert_eq!(summary.active_count, 2);
    }

    #[test]
    fn settled_transactions_only_count() {
        let mut settled = Transaction::build(TransactionKind::Debt, "Old".to_string(), 9000.0)
            .finalise(1, TODAY);
        settled.set_cleared(true);

        let summary = summarize(&[settled], TODAY);

        assert_eq!(summary.outstanding_debt, 0.0);
        assert_eq!(summary.settled_count, 1);
        assert_eq!(summary.active_count, 0);
    }

    #[test]
    fn due_soon_amount_covers_the_week_window() {
        let transactions = vec![
            Transaction::build(TransactionKind::Debt, "Today".to_string(), 100.0)
                .due_date(TODAY)
                .finalise(1, TODAY),
            Transaction::build(TransactionKind::Debt, "Next week".to_string(), 50.0)
                .due_date(TODAY + Duration::days(7))
                .finalise(2, TODAY),
            // Overdue and far-future items are not "due soon".
            Transaction::build(TransactionKind::Debt, "Overdue".to_string(), 999.0)
                .due_date(TODAY - Duration::days(1))
                .finalise(3, TODAY),
            Transaction::build(TransactionKind::Debt, "Later".to_string(), 999.0)
                .due_date(TODAY + Duration::days(8))
                .finalise(4, TODAY),
        ];

        let summary = summarize(&transactions, TODAY);

        assert_eq!(summary.due_soon_amount, 150.0);
    }
}
