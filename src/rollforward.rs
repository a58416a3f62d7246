//! The recurring rollforward engine.
//!
//! Decides, per recurring template and a caller-supplied "today", whether a
//! new concrete transaction is due to be materialized, and computes the
//! template's next state. Nothing here performs I/O: the output of
//! [next_materialization] is a description of exactly one write, which the
//! caller applies through [crate::stores::RecurringStore::advance] so that
//! the create-and-advance pair is atomic.

use time::{Date, Duration, Month};

use crate::models::{Frequency, NewTransaction, RecurringTransaction};

/// Appended to a template's name on materialized transactions so they are
/// recognizable as auto-generated.
pub const AUTO_GENERATED_SUFFIX: &str = " (Recurring)";

/// The next due date after an occurrence, per the template frequency.
///
/// Fixed day offsets for daily, weekly, and biweekly; calendar-month offsets
/// for the rest. Month arithmetic clamps the day-of-month to the length of
/// the target month, so `2024-01-31` plus one month is `2024-02-29`. Tests
/// pin this behavior.
pub fn next_due_after(occurrence: Date, frequency: Frequency) -> Date {
    match frequency {
        Frequency::Daily => occurrence.saturating_add(Duration::days(1)),
        Frequency::Weekly => occurrence.saturating_add(Duration::days(7)),
        Frequency::Biweekly => occurrence.saturating_add(Duration::days(14)),
        Frequency::Monthly => add_months(occurrence, 1),
        Frequency::Quarterly => add_months(occurrence, 3),
        Frequency::Semiannually => add_months(occurrence, 6),
        Frequency::Annually => add_months(occurrence, 12),
    }
}

fn add_months(date: Date, months: u8) -> Date {
    let step = months % 12;
    let month = date.month().nth_next(step);
    let mut year = date.year() + i32::from(months / 12);

    if step > 0 && month as u8 <= date.month() as u8 {
        year += 1;
    }

    clamp_to_month(year, month, date.day())
}

// Walks the day back until it lands inside the target month, e.g. the 31st
// becomes the 30th, 29th, or 28th.
fn clamp_to_month(year: i32, month: Month, day: u8) -> Date {
    let mut day = day;

    loop {
        match Date::from_calendar_date(year, month, day) {
            Ok(date) => break date,
            Err(_) => day -= 1,
        }
    }
}

/// Whether a template has an occurrence that should be materialized.
///
/// True iff the template is active, auto-creation is enabled, and the next
/// due date is today or in the past. The at-most-once guard is applied
/// separately in [next_materialization].
pub fn is_due(template: &RecurringTransaction, today: Date) -> bool {
    template.active && template.auto_create_transaction && template.next_due_date <= today
}

/// A description of a single rollforward write: the transaction to create
/// and the template fields to advance.
///
/// Must be applied atomically, see [crate::stores::RecurringStore::advance].
#[derive(Debug, Clone, PartialEq)]
pub struct Materialization {
    /// The concrete transaction to create for this occurrence.
    pub transaction: NewTransaction,
    /// The occurrence date being materialized. Becomes the template's
    /// `last_generated_date`.
    pub occurrence: Date,
    /// The template's new `next_due_date` after this occurrence.
    pub next_due_date: Date,
}

/// Decide whether the template's current occurrence should be materialized.
///
/// Returns `None` when the template is inactive, manual-only, not yet due,
/// or when `last_generated_date` already equals the current occurrence (the
/// at-most-once guard: a pass retried against unadvanced state must not
/// duplicate output).
pub fn next_materialization(
    template: &RecurringTransaction,
    today: Date,
) -> Option<Materialization> {
    if !is_due(template, today) {
        return None;
    }

    let occurrence = template.next_due_date;

    if template.last_generated_date == Some(occurrence) {
        return None;
    }

    let mut transaction = NewTransaction::new(
        template.kind,
        format!("{}{}", template.name, AUTO_GENERATED_SUFFIX),
        template.amount,
    )
    .due_date(occurrence);

    if let Some(contact) = &template.contact {
        transaction = transaction.contact(contact.clone());
    }

    Some(Materialization {
        transaction,
        occurrence,
        next_due_date: next_due_after(occurrence, template.frequency),
    })
}

/// All materializations needed to bring a template up to date, oldest first.
///
/// A template that has missed several occurrences (e.g. a daily template
/// untouched for ten days) is caught up one transaction per missed
/// occurrence, iterating until `next_due_date` passes `today`. The returned
/// list is a simulation; applying it is the caller's job.
pub fn catch_up(template: &RecurringTransaction, today: Date) -> Vec<Materialization> {
    let mut current = template.clone();
    let mut materializations = Vec::new();

    while let Some(materialization) = next_materialization(&current, today) {
        current.last_generated_date = Some(materialization.occurrence);
        current.next_due_date = materialization.next_due_date;
        materializations.push(materialization);
    }

    materializations
}

/// Active templates whose next occurrence is today or within the next 7
/// calendar days, for display alongside the due-soon transactions.
pub fn recurring_due_soon(
    templates: &[RecurringTransaction],
    today: Date,
) -> Vec<&RecurringTransaction> {
    templates
        .iter()
        .filter(|template| {
            template.active && (0..=7).contains(&(template.next_due_date - today).whole_days())
        })
        .collect()
}

#[cfg(test)]
mod rollforward_tests {
    use time::macros::date;

    use crate::models::{Frequency, RecurringTransaction, TransactionKind};

    use super::{
        AUTO_GENERATED_SUFFIX, catch_up, is_due, next_due_after, next_materialization,
        recurring_due_soon,
    };

    const TODAY: time::Date = date!(2026 - 08 - 26);

    fn template(frequency: Frequency, next_due_date: time::Date) -> RecurringTransaction {
        let mut template = RecurringTransaction::new(
            TransactionKind::Debt,
            "Gym membership".to_string(),
            45.0,
            frequency,
            next_due_date,
        );
        template.id = 7;
        template.contact = Some("FitCo".to_string());

        template
    }

    #[test]
    fn fixed_offsets_for_day_based_frequencies() {
        let start = date!(2026 - 08 - 26);

        assert_eq!(next_due_after(start, Frequency::Daily), date!(2026 - 08 - 27));
        assert_eq!(next_due_after(start, Frequency::Weekly), date!(2026 - 09 - 02));
        assert_eq!(next_due_after(start, Frequency::Biweekly), date!(2026 - 09 - 09));
    }

    #[test]
    fn month_offsets_keep_day_of_month() {
        let start = date!(2026 - 08 - 15);

        assert_eq!(next_due_after(start, Frequency::Monthly), date!(2026 - 09 - 15));
        assert_eq!(next_due_after(start, Frequency::Quarterly), date!(2026 - 11 - 15));
        assert_eq!(
            next_due_after(start, Frequency::Semiannually),
            date!(2027 - 02 - 15)
        );
        assert_eq!(next_due_after(start, Frequency::Annually), date!(2027 - 08 - 15));
    }

    #[test]
    fn monthly_rollforward_clamps_to_month_end() {
        // Regression lock: Jan 31 + 1 month lands on the last day of
        // February, not in March.
        assert_eq!(
            next_due_after(date!(2024 - 01 - 31), Frequency::Monthly),
            date!(2024 - 02 - 29)
        );
        assert_eq!(
            next_due_after(date!(2025 - 01 - 31), Frequency::Monthly),
            date!(2025 - 02 - 28)
        );
        assert_eq!(
            next_due_after(date!(2026 - 08 - 31), Frequency::Monthly),
            date!(2026 - 09 - 30)
        );
    }

    #[test]
    fn annual_rollforward_clamps_leap_day() {
        assert_eq!(
            next_due_after(date!(2024 - 02 - 29), Frequency::Annually),
            date!(2025 - 02 - 28)
        );
    }

    #[test]
    fn semiannual_rollforward_crosses_year_boundary() {
        assert_eq!(
            next_due_after(date!(2026 - 10 - 31), Frequency::Semiannually),
            date!(2027 - 04 - 30)
        );
    }

    #[test]
    fn due_today_and_overdue_templates_are_due() {
        assert!(is_due(&template(Frequency::Daily, TODAY), TODAY));
        assert!(is_due(&template(Frequency::Daily, date!(2026 - 08 - 01)), TODAY));
        assert!(!is_due(&template(Frequency::Daily, date!(2026 - 08 - 27)), TODAY));
    }

    #[test]
    fn inactive_template_is_never_due() {
        let mut overdue = template(Frequency::Daily, date!(2020 - 01 - 01));
        overdue.active = false;

        assert!(!is_due(&overdue, TODAY));
        assert!(next_materialization(&overdue, TODAY).is_none());
    }

    #[test]
    fn manual_only_template_is_skipped() {
        let mut manual = template(Frequency::Daily, TODAY);
        manual.auto_create_transaction = false;

        assert!(next_materialization(&manual, TODAY).is_none());
    }

    #[test]
    fn already_generated_occurrence_is_skipped() {
        let mut generated = template(Frequency::Monthly, TODAY);
        generated.last_generated_date = Some(TODAY);

        assert!(next_materialization(&generated, TODAY).is_none());
    }

    #[test]
    fn materialization_describes_transaction_and_advance() {
        let template = template(Frequency::Monthly, date!(2026 - 08 - 20));

        let materialization = next_materialization(&template, TODAY).unwrap();

        assert_eq!(materialization.occurrence, date!(2026 - 08 - 20));
        assert_eq!(materialization.next_due_date, date!(2026 - 09 - 20));
        assert_eq!(
            materialization.transaction.name(),
            format!("Gym membership{AUTO_GENERATED_SUFFIX}")
        );
        assert_eq!(materialization.transaction.amount(), 45.0);
        assert_eq!(
            materialization.transaction.built_due_date(),
            Some(date!(2026 - 08 - 20))
        );
    }

    #[test]
    fn rollforward_is_idempotent_once_applied() {
        let mut current = template(Frequency::Monthly, TODAY);

        let materialization = next_materialization(&current, TODAY).unwrap();
        current.last_generated_date = Some(materialization.occurrence);
        current.next_due_date = materialization.next_due_date;

        // A second pass on the same day must not produce a duplicate.
        assert!(next_materialization(&current, TODAY).is_none());
    }

    #[test]
    fn catch_up_emits_one_materialization_per_missed_occurrence() {
        let behind = template(Frequency::Daily, date!(2026 - 08 - 17));

        let materializations = catch_up(&behind, TODAY);

        // Aug 17 through Aug 26 inclusive.
        assert_eq!(materializations.len(), 10);
        assert_eq!(materializations[0].occurrence, date!(2026 - 08 - 17));
        assert_eq!(materializations[9].occurrence, TODAY);
        assert_eq!(materializations[9].next_due_date, date!(2026 - 08 - 27));
    }

    #[test]
    fn catch_up_on_pending_template_is_empty() {
        let pending = template(Frequency::Weekly, date!(2026 - 09 - 01));

        assert!(catch_up(&pending, TODAY).is_empty());
    }

    #[test]
    fn recurring_due_soon_window_is_inclusive_week() {
        let mut inactive = template(Frequency::Weekly, TODAY);
        inactive.active = false;

        let templates = vec![
            template(Frequency::Weekly, TODAY),
            template(Frequency::Weekly, date!(2026 - 09 - 02)),
            // Beyond the 7-day window.
            template(Frequency::Weekly, date!(2026 - 09 - 03)),
            // Overdue, not "due soon".
            template(Frequency::Weekly, date!(2026 - 08 - 25)),
            inactive,
        ];

        let due_soon = recurring_due_soon(&templates, TODAY);

        assert_eq!(due_soon.len(), 2);
    }
}
