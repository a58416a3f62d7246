//! CSV export of the ledger.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    models::{Transaction, TransactionKind},
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

const HEADERS: [&str; 11] = [
    "Date Added",
    "Type",
    "Name",
    "Total Amount",
    "Payments Made",
    "Remaining",
    "Status",
    "Due Date",
    "Contact",
    "Returns %",
    "Notes",
];

/// Render transactions as CSV, one row per transaction.
///
/// Credits are labelled `Incoming` and debts `Outgoing`; settled
/// transactions show as `Settled`, the rest as `Active`. Amounts are
/// rendered with two decimal places and dates as `YYYY-MM-DD`. Quoting and
/// escaping of names, contacts, and notes is handled by the CSV writer.
pub fn write_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(HEADERS)?;

    for transaction in transactions {
        writer.write_record([
            format_date(transaction.created_at())?,
            match transaction.kind() {
                TransactionKind::Credit => "Incoming".to_string(),
                TransactionKind::Debt => "Outgoing".to_string(),
            },
            transaction.name().to_string(),
            format!("{:.2}", transaction.amount()),
            format!("{:.2}", transaction.total_paid()),
            format!("{:.2}", transaction.remaining()),
            if transaction.cleared() {
                "Settled".to_string()
            } else {
                "Active".to_string()
            },
            match transaction.due_date() {
                Some(due_date) => format_date(due_date)?,
                None => String::new(),
            },
            transaction.contact().unwrap_or_default().to_string(),
            transaction
                .returns_percentage()
                .map(|percentage| percentage.to_string())
                .unwrap_or_default(),
            transaction.note().unwrap_or_default().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::Csv(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::Csv(error.to_string()))
}

/// The suggested file name for an export taken on `today`, e.g.
/// `transactions-2026-08-26.csv`.
pub fn export_filename(today: Date) -> String {
    format!("transactions-{today}.csv")
}

fn format_date(date: Date) -> Result<String, Error> {
    date.format(&DATE_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), date.to_string()))
}
