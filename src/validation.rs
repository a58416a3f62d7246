//! Input validation and sanitization for transaction fields.
//!
//! The classification and rollforward logic assumes amounts and dates have
//! already been validated; this module is that upstream gate. Validation
//! collects every violation instead of stopping at the first, so a form can
//! show all problems at once.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Error,
    models::{NewTransaction, TransactionKind},
};

/// Maximum length of a transaction name, in grapheme clusters.
pub const NAME_MAX_LEN: usize = 100;
/// Maximum length of a note, in grapheme clusters.
pub const NOTE_MAX_LEN: usize = 500;
/// Maximum length of a contact, in grapheme clusters.
pub const CONTACT_MAX_LEN: usize = 100;
/// Largest accepted amount.
pub const AMOUNT_MAX: f64 = 999_999_999.0;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Raw, untrusted transaction fields as received from a form or import.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    /// Credit or debt.
    pub kind: TransactionKind,
    /// Name of the obligation or the other party.
    pub name: String,
    /// The full amount owed.
    pub amount: f64,
    /// Optional free-text note.
    pub note: Option<String>,
    /// Optional contact details.
    pub contact: Option<String>,
    /// Optional due date as a `YYYY-MM-DD` string.
    pub due_date: Option<String>,
    /// Optional expected returns percentage.
    pub returns_percentage: Option<f64>,
}

/// Strip markup and control content from untrusted text and bound its
/// length.
///
/// Removes HTML tags, the `javascript:` protocol, and NUL bytes, trims
/// surrounding whitespace, then truncates to `max_graphemes` grapheme
/// clusters so multi-byte text is never cut mid-character.
pub fn sanitize(input: &str, max_graphemes: usize) -> String {
    let mut stripped = String::with_capacity(input.len());
    let mut in_tag = false;

    for character in input.chars() {
        match character {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            '\0' => {}
            c if !in_tag => stripped.push(c),
            _ => {}
        }
    }

    let stripped = remove_ascii_case_insensitive(&stripped, "javascript:");

    stripped
        .trim()
        .graphemes(true)
        .take(max_graphemes)
        .collect()
}

fn remove_ascii_case_insensitive(haystack: &str, needle: &str) -> String {
    let mut result = String::with_capacity(haystack.len());
    let mut remainder = haystack;

    loop {
        let lowered = remainder.to_ascii_lowercase();

        match lowered.find(needle) {
            Some(position) => {
                result.push_str(&remainder[..position]);
                remainder = &remainder[position + needle.len()..];
            }
            None => {
                result.push_str(remainder);
                break;
            }
        }
    }

    result
}

/// Whether an amount is a positive, finite number within the supported
/// range.
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0 && amount <= AMOUNT_MAX
}

/// Parse a `YYYY-MM-DD` due-date string.
///
/// # Errors
///
/// Returns [Error::InvalidDateFormat] when the string does not parse as a
/// calendar date.
pub fn parse_due_date(input: &str) -> Result<Date, Error> {
    Date::parse(input, &DATE_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), input.to_string()))
}

/// Validate and sanitize raw transaction input.
///
/// Returns a ready-to-store [NewTransaction] on success. On failure returns
/// every violation found, not just the first.
pub fn validate_transaction(input: &TransactionInput) -> Result<NewTransaction, Vec<Error>> {
    let mut errors = Vec::new();

    let name = sanitize(&input.name, usize::MAX);
    if name.is_empty() {
        errors.push(Error::EmptyName);
    } else if name.graphemes(true).count() > NAME_MAX_LEN {
        errors.push(Error::NameTooLong);
    }

    if !is_valid_amount(input.amount) {
        errors.push(Error::InvalidAmount(input.amount));
    }

    let note = input.note.as_ref().map(|note| sanitize(note, usize::MAX));
    if let Some(note) = &note {
        if note.graphemes(true).count() > NOTE_MAX_LEN {
            errors.push(Error::NoteTooLong);
        }
    }

    let contact = input
        .contact
        .as_ref()
        .map(|contact| sanitize(contact, usize::MAX));
    if let Some(contact) = &contact {
        if contact.graphemes(true).count() > CONTACT_MAX_LEN {
            errors.push(Error::ContactTooLong);
        }
    }

    let due_date = match &input.due_date {
        Some(due_date) => match parse_due_date(due_date) {
            Ok(date) => Some(date),
            Err(error) => {
                errors.push(error);
                None
            }
        },
        None => None,
    };

    if let Some(percentage) = input.returns_percentage {
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            errors.push(Error::InvalidPercentage(percentage));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut builder = NewTransaction::new(input.kind, name, input.amount);

    if let Some(note) = note.filter(|note| !note.is_empty()) {
        builder = builder.note(note);
    }

    if let Some(contact) = contact.filter(|contact| !contact.is_empty()) {
        builder = builder.contact(contact);
    }

    if let Some(due_date) = due_date {
        builder = builder.due_date(due_date);
    }

    if let Some(percentage) = input.returns_percentage {
        builder = builder.returns_percentage(percentage);
    }

    Ok(builder)
}
