//! Defines the transaction store trait.

use time::Date;

use crate::{
    Error,
    models::{NewTransaction, Payment, Transaction, TransactionId},
};

/// Handles the creation, retrieval, and mutation of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// `today` becomes the transaction's creation date; it is passed in
    /// rather than read from the wall clock so callers control time.
    fn create(&mut self, builder: NewTransaction, today: Date) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve every transaction, in insertion order.
    ///
    /// The order must be stable: urgency tie-breaking is first-seen-wins
    /// over this order.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Replace the stored transaction that has the same ID.
    fn update(&mut self, transaction: &Transaction) -> Result<(), Error>;

    /// Remove a transaction from the store.
    fn delete(&mut self, id: TransactionId) -> Result<(), Error>;

    /// Record a partial payment against a transaction and return the updated
    /// record.
    fn add_payment(&mut self, id: TransactionId, payment: Payment) -> Result<Transaction, Error>;

    /// Explicitly settle or un-settle a transaction and return the updated
    /// record.
    fn set_cleared(&mut self, id: TransactionId, cleared: bool) -> Result<Transaction, Error>;
}
