//! Decoding of base64 CSV payloads into rows.
//!
//! Text decoding is permissive: invalid UTF-8 is replaced with U+FFFD rather
//! than rejected, and a leading UTF-8 BOM is dropped so it never ends up in
//! the first header name. Only malformed base64 is an error.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use csv::{ReaderBuilder, StringRecord};

use super::Row;
use crate::error::AppError;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// UTF-8 BOM bytes.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Standard alphabet with padding. Non-zero bits after the last full byte are
/// discarded instead of rejected (`YR==` decodes to `a`).
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Rows and header list decoded from one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedTable {
    /// Header names in file order. May contain duplicates.
    pub headers: Vec<String>,
    /// Data rows keyed by header name.
    pub rows: Vec<Row>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes a base64 payload and parses it as CSV.
///
/// `filename` is only used for error reporting and logging; the payload's
/// presence is the caller's concern.
///
/// # Errors
///
/// Returns `AppError::InvalidBase64` if the payload is not valid base64.
pub fn decode_file(filename: &str, payload: &str) -> Result<DecodedTable, AppError> {
    let bytes = decode_base64(filename, payload)?;
    let table = parse_csv(&bytes)?;

    tracing::debug!(
        filename,
        bytes = bytes.len(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "Decoded input file"
    );

    Ok(table)
}

/// Decodes standard (padded) base64. ASCII whitespace such as MIME line
/// wrapping is ignored.
pub fn decode_base64(filename: &str, payload: &str) -> Result<Vec<u8>, AppError> {
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    PAYLOAD_ENGINE
        .decode(&compact)
        .map_err(|e| AppError::InvalidBase64 {
            filename: filename.to_string(),
            message: e.to_string(),
        })
}

/// Parses CSV bytes into a header list and rows.
///
/// The first non-blank line is the header row. Records shorter than the
/// header get empty strings for the missing columns; fields beyond the header
/// count are dropped. When a header name repeats, the later column's value
/// wins. Empty input yields no headers and no rows.
///
/// # Errors
///
/// Returns `AppError::CsvInvalid` if the reader reports a record it cannot parse.
pub fn parse_csv(bytes: &[u8]) -> Result<DecodedTable, AppError> {
    let data = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = String::from_utf8_lossy(data);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::CsvInvalid(format!("Failed to read CSV headers: {}", e)))?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result
            .map_err(|e| AppError::CsvInvalid(format!("Failed to read CSV record: {}", e)))?;
        rows.push(row_from_record(&headers, &record));
    }

    Ok(DecodedTable { headers, rows })
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn row_from_record(headers: &[String], record: &StringRecord) -> Row {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| (header.as_str(), record.get(i).unwrap_or("")))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
