//! Debtbook is the core logic of a personal debt-and-credit tracker.
//!
//! The crate is a headless library: it owns no persistence, network, or UI
//! surface. Callers supply transaction and recurring-template records (plus an
//! explicit "today") and consume classification flags, urgency scores, and
//! descriptions of writes to apply through the [stores] traits.
//!
//! The two central pieces are the urgency classifier in [urgency] and the
//! recurring rollforward engine in [rollforward]. Everything else supports
//! them: the domain model in [models], input validation in [validation], CSV
//! export in [export], reminder templating in [reminder], and the
//! backend-agnostic store interface in [stores].

#![warn(missing_docs)]

pub mod export;
pub mod filter;
pub mod models;
pub mod processor;
pub mod rate_limit;
pub mod reminder;
pub mod rollforward;
pub mod stores;
pub mod summary;
pub mod urgency;
pub mod validation;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource could not be found.
    ///
    /// Internally, this error may occur when a store lookup matches no record.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist.
    #[error("tried to update a transaction that is not in the store")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist.
    #[error("tried to delete a transaction that is not in the store")]
    DeleteMissingTransaction,

    /// Tried to update a recurring template that does not exist.
    #[error("tried to update a recurring template that is not in the store")]
    UpdateMissingRecurring,

    /// Tried to delete a recurring template that does not exist.
    #[error("tried to delete a recurring template that is not in the store")]
    DeleteMissingRecurring,

    /// An amount that is not a positive, finite number within the supported
    /// range was used to create a transaction.
    #[error("{0} is not a valid amount: amounts must be positive, finite and at most 999,999,999")]
    InvalidAmount(f64),

    /// An empty string (after sanitization) was used as a transaction name.
    #[error("transaction name cannot be empty")]
    EmptyName,

    /// A transaction name longer than the supported maximum was given.
    #[error("transaction name is too long")]
    NameTooLong,

    /// A note longer than the supported maximum was given.
    #[error("note is too long")]
    NoteTooLong,

    /// A contact longer than the supported maximum was given.
    #[error("contact is too long")]
    ContactTooLong,

    /// A returns percentage outside of 0-100 was given.
    #[error("{0} is not a valid percentage: must be between 0 and 100")]
    InvalidPercentage(f64),

    /// There was an error parsing or formatting a calendar date.
    ///
    /// Callers should pass in the original error as a string and the date
    /// string that caused the error.
    #[error("could not handle date string \"{1}\": {0}")]
    InvalidDateFormat(String, String),

    /// The CSV writer had issues producing the export.
    #[error("could not write the CSV export: {0}")]
    Csv(String),
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        tracing::error!("an unhandled CSV error occurred: {}", value);
        Error::Csv(value.to_string())
    }
}
