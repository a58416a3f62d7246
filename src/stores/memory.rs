//! An in-process store backing both store traits.
//!
//! This is the reference implementation of the store contracts, in
//! particular the atomicity of [RecurringStore::advance]: being single
//! threaded and in-memory, verify/create/advance trivially happen as one
//! unit. Real backends must provide the same guarantee server-side.

use time::Date;

use crate::{
    Error,
    models::{
        NewTransaction, Payment, RecurringId, RecurringTransaction, Transaction, TransactionId,
    },
    rollforward::Materialization,
    stores::{AdvanceResult, RecurringStore, TransactionStore},
};

/// A Vec-backed store for transactions and recurring templates.
///
/// Records are kept in insertion order and IDs are assigned monotonically,
/// so iteration order is stable across calls.
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    templates: Vec<RecurringTransaction>,
    next_transaction_id: TransactionId,
    next_recurring_id: RecurringId,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            templates: Vec::new(),
            next_transaction_id: 1,
            next_recurring_id: 1,
        }
    }

    fn transaction_mut(&mut self, id: TransactionId) -> Option<&mut Transaction> {
        self.transactions
            .iter_mut()
            .find(|transaction| transaction.id() == id)
    }

    fn template_mut(&mut self, id: RecurringId) -> Option<&mut RecurringTransaction> {
        self.templates.iter_mut().find(|template| template.id == id)
    }
}

impl TransactionStore for MemoryStore {
    fn create(&mut self, builder: NewTransaction, today: Date) -> Result<Transaction, Error> {
        let id = self.next_transaction_id;
        self.next_transaction_id += 1;

        let transaction = builder.finalise(id, today);
        self.transactions.push(transaction.clone());

        Ok(transaction)
    }

    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id() == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        Ok(self.transactions.clone())
    }

    fn update(&mut self, transaction: &Transaction) -> Result<(), Error> {
        match self.transaction_mut(transaction.id()) {
            Some(stored) => {
                *stored = transaction.clone();
                Ok(())
            }
            None => Err(Error::UpdateMissingTransaction),
        }
    }

    fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        let count_before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id() != id);

        if self.transactions.len() == count_before {
            return Err(Error::DeleteMissingTransaction);
        }

        Ok(())
    }

    fn add_payment(&mut self, id: TransactionId, payment: Payment) -> Result<Transaction, Error> {
        let transaction = self.transaction_mut(id).ok_or(Error::NotFound)?;
        transaction.record_payment(payment);

        Ok(transaction.clone())
    }

    fn set_cleared(&mut self, id: TransactionId, cleared: bool) -> Result<Transaction, Error> {
        let transaction = self.transaction_mut(id).ok_or(Error::NotFound)?;
        transaction.set_cleared(cleared);

        Ok(transaction.clone())
    }
}

impl RecurringStore for MemoryStore {
    fn create(
        &mut self,
        mut template: RecurringTransaction,
    ) -> Result<RecurringTransaction, Error> {
        template.id = self.next_recurring_id;
        self.next_recurring_id += 1;

        self.templates.push(template.clone());

        Ok(template)
    }

    fn get(&self, id: RecurringId) -> Result<RecurringTransaction, Error> {
        self.templates
            .iter()
            .find(|template| template.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_all(&self) -> Result<Vec<RecurringTransaction>, Error> {
        Ok(self.templates.clone())
    }

    fn update(&mut self, template: &RecurringTransaction) -> Result<(), Error> {
        match self.template_mut(template.id) {
            Some(stored) => {
                *stored = template.clone();
                Ok(())
            }
            None => Err(Error::UpdateMissingRecurring),
        }
    }

    fn delete(&mut self, id: RecurringId) -> Result<(), Error> {
        let count_before = self.templates.len();
        self.templates.retain(|template| template.id != id);

        if self.templates.len() == count_before {
            return Err(Error::DeleteMissingRecurring);
        }

        Ok(())
    }

    fn set_active(
        &mut self,
        id: RecurringId,
        active: bool,
    ) -> Result<RecurringTransaction, Error> {
        let template = self.template_mut(id).ok_or(Error::NotFound)?;
        template.active = active;

        Ok(template.clone())
    }

    fn advance(
        &mut self,
        id: RecurringId,
        materialization: &Materialization,
        today: Date,
    ) -> Result<AdvanceResult, Error> {
        let template = self
            .templates
            .iter_mut()
            .find(|template| template.id == id)
            .ok_or(Error::NotFound)?;

        // Compare-and-swap keyed on the occurrence date.
        if template.next_due_date != materialization.occurrence {
            tracing::debug!(
                template_id = id,
                occurrence = %materialization.occurrence,
                next_due_date = %template.next_due_date,
                "stale advance: occurrence is no longer current"
            );
            return Ok(AdvanceResult::Stale);
        }

        template.last_generated_date = Some(materialization.occurrence);
        template.next_due_date = materialization.next_due_date;
        let template = template.clone();

        let transaction_id = self.next_transaction_id;
        self.next_transaction_id += 1;

        let transaction = materialization.transaction.clone().finalise(transaction_id, today);
        self.transactions.push(transaction.clone());

        Ok(AdvanceResult::Advanced {
            transaction,
            template,
        })
    }
}
