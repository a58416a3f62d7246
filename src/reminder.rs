//! Builds copy-ready reminder messages for an outstanding transaction.
//!
//! Four tones form an escalation ladder; the caller picks one, shows the
//! preview, and copies the text into whatever messaging app they use.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::models::Transaction;

/// The tone of a reminder message, from gentle to last-warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderTone {
    /// A friendly nudge.
    Casual,
    /// A courteous but clear request.
    Polite,
    /// A firm demand.
    Stern,
    /// The final warning.
    Ultimatum,
}

impl ReminderTone {
    /// Every tone, in escalation order.
    pub const ALL: [ReminderTone; 4] = [
        ReminderTone::Casual,
        ReminderTone::Polite,
        ReminderTone::Stern,
        ReminderTone::Ultimatum,
    ];

    /// The display title for the tone.
    pub fn title(&self) -> &'static str {
        match self {
            ReminderTone::Casual => "Casual Nudge",
            ReminderTone::Polite => "Polite Notice",
            ReminderTone::Stern => "Stern Demand",
            ReminderTone::Ultimatum => "Final Warning",
        }
    }
}

/// Compose the reminder text for a transaction in the given tone.
///
/// The message addresses the first word of the transaction's name and embeds
/// the formatted outstanding amount. The casual tone references the note
/// when one exists.
pub fn reminder_message(transaction: &Transaction, tone: ReminderTone) -> String {
    let first_name = transaction
        .name()
        .split_whitespace()
        .next()
        .unwrap_or_else(|| transaction.name());
    let amount = format_currency(transaction.amount());

    match tone {
        ReminderTone::Casual => {
            let context = transaction.note().unwrap_or("our last exchange");
            format!(
                "Hey {first_name}! Just doing my monthly financial cleanup. Looks like there's \
                still {amount} pending from {context}. No rush, just keeping the books tidy!"
            )
        }
        ReminderTone::Polite => format!(
            "Greetings {first_name}. I am reviewing the ledger and noted an outstanding balance \
            of {amount}. Kindly remit payment at your earliest convenience to settle this account."
        ),
        ReminderTone::Stern => format!(
            "NOTICE: the ledger shows an amount of {amount} outstanding. Immediate action is \
            requested to keep this account in good standing."
        ),
        ReminderTone::Ultimatum => format!(
            "Silence is acceptance of debt. {amount}. Send it now. Do not make me ask again."
        ),
    }
}

/// Format an amount as a dollar currency string, e.g. `$1,234.50`.
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}
