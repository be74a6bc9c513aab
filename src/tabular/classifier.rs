//! Success/failure classification of merged rows.

use super::{Row, AMOUNT_COLUMN};

/// Rows split by [`is_success`]. Every input row lands in exactly one side,
/// in its original relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedRows {
    pub success: Vec<Row>,
    pub failure: Vec<Row>,
}

impl ClassifiedRows {
    pub fn total(&self) -> usize {
        self.success.len() + self.failure.len()
    }
}

/// Returns true when the row's `amount` parses as a number `>= 0`.
///
/// A missing column, empty or non-numeric text, and NaN all classify as
/// failure. Never panics.
pub fn is_success(row: &Row) -> bool {
    row.get(AMOUNT_COLUMN)
        .and_then(parse_amount)
        .map_or(false, |amount| amount >= 0.0)
}

/// Partitions rows into success and failure, preserving order within each.
pub fn classify(rows: Vec<Row>) -> ClassifiedRows {
    let (success, failure): (Vec<Row>, Vec<Row>) = rows.into_iter().partition(is_success);
    ClassifiedRows { success, failure }
}

/// Parses a trimmed amount. Single underscores between digits are accepted
/// as group separators (`1_000`); any other underscore is invalid.
fn parse_amount(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if !text.contains('_') {
        return text.parse::<f64>().ok();
    }

    let bytes = text.as_bytes();
    let mut digits = String::with_capacity(text.len());
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let between_digits = i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).map_or(false, u8::is_ascii_digit);
            if !between_digits {
                return None;
            }
        } else {
            digits.push(char::from(b));
        }
    }
    digits.parse::<f64>().ok()
}
