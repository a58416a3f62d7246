//! This file defines the type `Transaction`, the core type of the
//! debt-tracking part of the application.

use serde::{Deserialize, Serialize};
use time::Date;

/// Alias for the integer type used for transaction record IDs.
pub type TransactionId = i64;

/// Whether money is owed to the user or by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money owed *to* the user.
    Credit,
    /// Money the user owes to someone else.
    Debt,
}

/// A partial payment recorded against a transaction.
///
/// Payments reduce the outstanding balance shown for the transaction but do
/// not change its `amount`, `due_date`, or `cleared` flag. Settlement is a
/// separate, explicit action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// How much was paid.
    pub amount: f64,
    /// When the payment was made.
    pub date: Date,
    /// An optional note, e.g. how the payment was made.
    pub note: Option<String>,
}

/// A single recorded credit or debt, optionally with partial payments and a
/// due date.
///
/// To create a new `Transaction`, use [Transaction::build] and finalise the
/// builder through a [crate::stores::TransactionStore].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    kind: TransactionKind,
    name: String,
    amount: f64,
    contact: Option<String>,
    note: Option<String>,
    due_date: Option<Date>,
    returns_percentage: Option<f64>,
    cleared: bool,
    created_at: Date,
    payments: Vec<Payment>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction::new] for discoverability.
    pub fn build(kind: TransactionKind, name: String, amount: f64) -> NewTransaction {
        NewTransaction::new(kind, name, amount)
    }

    /// The ID of the transaction.
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Whether this is money owed to the user or by the user.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// What or who the transaction is for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full amount owed. Partial payments do not change this value.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Contact details for the other party.
    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }

    /// A free-text note.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// The calendar day the amount is due, if any.
    pub fn due_date(&self) -> Option<Date> {
        self.due_date
    }

    /// Expected returns on the amount, as a percentage between 0 and 100.
    pub fn returns_percentage(&self) -> Option<f64> {
        self.returns_percentage
    }

    /// True once the transaction has been explicitly settled.
    ///
    /// Cleared transactions are excluded from urgency ranking and from the
    /// due-soon/overdue notification set.
    pub fn cleared(&self) -> bool {
        self.cleared
    }

    /// The day the transaction was recorded.
    pub fn created_at(&self) -> Date {
        self.created_at
    }

    /// The partial payments made against this transaction, in the order they
    /// were recorded.
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// The sum of all partial payments.
    pub fn total_paid(&self) -> f64 {
        self.payments.iter().map(|payment| payment.amount).sum()
    }

    /// The outstanding balance for display: `amount - total_paid`, floored at
    /// zero in case of overpayment.
    pub fn remaining(&self) -> f64 {
        (self.amount - self.total_paid()).max(0.0)
    }

    /// Append a partial payment.
    ///
    /// This does not change `amount`, `due_date`, or `cleared`, even if the
    /// payment brings the remaining balance to zero.
    pub fn record_payment(&mut self, payment: Payment) {
        self.payments.push(payment);
    }

    /// Mark the transaction as settled or not.
    pub fn set_cleared(&mut self, cleared: bool) {
        self.cleared = cleared;
    }
}

/// Builder for creating a new [Transaction].
///
/// The function for finalizing the builder is [NewTransaction::finalise],
/// which stores usually call on the caller's behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    kind: TransactionKind,
    name: String,
    amount: f64,
    contact: Option<String>,
    note: Option<String>,
    due_date: Option<Date>,
    returns_percentage: Option<f64>,
}

impl NewTransaction {
    /// Create a builder for a transaction with the required fields.
    ///
    /// `amount` is assumed to have been validated upstream, see
    /// [crate::validation::validate_transaction].
    pub fn new(kind: TransactionKind, name: String, amount: f64) -> Self {
        Self {
            kind,
            name,
            amount,
            contact: None,
            note: None,
            due_date: None,
            returns_percentage: None,
        }
    }

    /// Set the contact details for the other party.
    pub fn contact(mut self, contact: String) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Set a free-text note.
    pub fn note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }

    /// Set the day the amount is due.
    pub fn due_date(mut self, due_date: Date) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the expected returns percentage.
    pub fn returns_percentage(mut self, percentage: f64) -> Self {
        self.returns_percentage = Some(percentage);
        self
    }

    /// The name the transaction will be created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The amount the transaction will be created with.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The due date the transaction will be created with, if any.
    pub fn built_due_date(&self) -> Option<Date> {
        self.due_date
    }

    /// Turn the builder into a [Transaction] with the given ID and creation
    /// date.
    ///
    /// New transactions start not cleared and with no payments.
    pub fn finalise(self, id: TransactionId, created_at: Date) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            name: self.name,
            amount: self.amount,
            contact: self.contact,
            note: self.note,
            due_date: self.due_date,
            returns_percentage: self.returns_percentage,
            cleared: false,
            created_at,
            payments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod transaction_tests {
    use time::macros::date;

    use super::{Payment, Transaction, TransactionKind};

    fn sample_transaction() -> Transaction {
        Transaction::build(TransactionKind::Debt, "Rent arrears".to_string(), 1200.0)
            .contact("Dana Property Ltd".to_string())
            .due_date(date!(2026 - 09 - 01))
            .finalise(1, date!(2026 - 08 - 01))
    }

    #[test]
    fn finalise_starts_uncleared_with_no_payments() {
        let transaction = sample_transaction();

        assert!(!transaction.cleared());
        assert!(transaction.payments().is_empty());
        assert_eq!(transaction.total_paid(), 0.0);
        assert_eq!(transaction.remaining(), 1200.0);
    }

    #[test]
    fn payments_reduce_remaining_but_not_amount() {
        let mut transaction = sample_transaction();

        transaction.record_payment(Payment {
            amount: 400.0,
            date: date!(2026 - 08 - 10),
            note: Some("bank transfer".to_string()),
        });
        transaction.record_payment(Payment {
            amount: 300.0,
            date: date!(2026 - 08 - 20),
            note: None,
        });

        assert_eq!(transaction.amount(), 1200.0);
        assert_eq!(transaction.total_paid(), 700.0);
        assert_eq!(transaction.remaining(), 500.0);
        assert!(!transaction.cleared());
    }

    #[test]
    fn full_payment_does_not_settle() {
        let mut transaction = sample_transaction();

        transaction.record_payment(Payment {
            amount: 1200.0,
            date: date!(2026 - 08 - 10),
            note: None,
        });

        assert_eq!(transaction.remaining(), 0.0);
        assert!(!transaction.cleared(), "settlement must stay explicit");
    }

    #[test]
    fn overpayment_floors_remaining_at_zero() {
        let mut transaction = sample_transaction();

        transaction.record_payment(Payment {
            amount: 1500.0,
            date: date!(2026 - 08 - 10),
            note: None,
        });

        assert_eq!(transaction.remaining(), 0.0);
    }

    #[test]
    fn serde_round_trip_preserves_transaction() {
        let transaction = sample_transaction();

        let json = serde_json::to_string(&transaction).unwrap();
        let parsed: Transaction = serde_json::from_str(&json).unwrap();

        assert_eq!(transaction, parsed);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionKind::Debt).unwrap();

        assert_eq!(json, "\"debt\"");
    }
}
