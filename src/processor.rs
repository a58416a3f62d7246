//! Runs a rollforward pass over every recurring template in a store.

use time::Date;

use crate::{
    Error,
    rollforward::next_materialization,
    stores::{AdvanceResult, RecurringStore},
};

/// Materialize every due occurrence of every template in the store.
///
/// Each template is caught up one occurrence at a time: the materialization
/// is computed against the template's current state and applied through the
/// store's atomic [advance](RecurringStore::advance), then the loop
/// continues with the advanced template until `next_due_date` passes
/// `today`. A [Stale](AdvanceResult::Stale) result means another pass got
/// there first; that template is left alone.
///
/// Returns the number of transactions created. Running the pass twice on the
/// same day creates nothing the second time.
pub fn process_recurring<S: RecurringStore>(store: &mut S, today: Date) -> Result<usize, Error> {
    let mut created = 0;

    for template in store.get_all()? {
        let mut current = template;

        loop {
            let Some(materialization) = next_materialization(&current, today) else {
                tracing::debug!(
                    template_id = current.id,
                    name = %current.name,
                    active = current.active,
                    auto_create = current.auto_create_transaction,
                    next_due_date = %current.next_due_date,
                    "template not eligible for rollforward"
                );
                break;
            };

            match store.advance(current.id, &materialization, today)? {
                AdvanceResult::Advanced {
                    transaction,
                    template,
                } => {
                    tracing::info!(
                        template_id = template.id,
                        transaction_id = transaction.id(),
                        occurrence = %materialization.occurrence,
                        next_due_date = %template.next_due_date,
                        "materialized recurring occurrence"
                    );
                    created += 1;
                    current = template;
                }
                AdvanceResult::Stale => {
                    tracing::warn!(
                        template_id = current.id,
                        occurrence = %materialization.occurrence,
                        "another rollforward pass advanced this template"
                    );
                    break;
                }
            }
        }
    }

    Ok(created)
}
