//! Defines the recurring template store trait and its atomic
//! check-and-advance operation.

use time::Date;

use crate::{
    Error,
    models::{RecurringId, RecurringTransaction, Transaction},
    rollforward::Materialization,
};

/// The outcome of [RecurringStore::advance].
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult {
    /// The occurrence was current and has been materialized.
    Advanced {
        /// The concrete transaction that was created.
        transaction: Transaction,
        /// The template after its due dates were advanced.
        template: RecurringTransaction,
    },
    /// The template's `next_due_date` no longer matches the materialization's
    /// occurrence: another pass already advanced it. Nothing was written.
    Stale,
}

/// Handles the creation, retrieval, and mutation of recurring templates.
pub trait RecurringStore {
    /// Create a new template in the store, assigning its ID.
    fn create(&mut self, template: RecurringTransaction)
    -> Result<RecurringTransaction, Error>;

    /// Retrieve a template from the store.
    fn get(&self, id: RecurringId) -> Result<RecurringTransaction, Error>;

    /// Retrieve every template, in insertion order.
    fn get_all(&self) -> Result<Vec<RecurringTransaction>, Error>;

    /// Replace the stored template that has the same ID.
    fn update(&mut self, template: &RecurringTransaction) -> Result<(), Error>;

    /// Remove a template from the store.
    fn delete(&mut self, id: RecurringId) -> Result<(), Error>;

    /// Toggle whether the template participates in rollforward.
    fn set_active(&mut self, id: RecurringId, active: bool)
    -> Result<RecurringTransaction, Error>;

    /// Atomically materialize one occurrence of a template.
    ///
    /// Implementations must, as a single atomic unit:
    /// 1. verify the template's `next_due_date` still equals
    ///    `materialization.occurrence`, returning [AdvanceResult::Stale]
    ///    without writing anything otherwise;
    /// 2. create the concrete transaction described by the materialization,
    ///    dated `today`;
    /// 3. set the template's `last_generated_date` to the occurrence and its
    ///    `next_due_date` to the materialization's next due date.
    ///
    /// The check in step 1 is what makes concurrent rollforward passes safe:
    /// it is a compare-and-swap keyed on the occurrence date. A partial
    /// application (transaction created but template not advanced) would
    /// allow duplicate materialization and is a contract violation.
    fn advance(
        &mut self,
        id: RecurringId,
        materialization: &Materialization,
        today: Date,
    ) -> Result<AdvanceResult, Error>;
}
