//! The domain models: transactions, payments, and recurring templates.

mod recurring;
mod transaction;

pub use recurring::{Frequency, RecurringCategory, RecurringId, RecurringTransaction};
pub use transaction::{NewTransaction, Payment, Transaction, TransactionId, TransactionKind};
