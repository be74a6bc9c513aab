//! Rendering of rows back into CSV text against the master header list.

use csv::{Terminator, WriterBuilder};

use super::Row;
use crate::error::AppError;

/// Renders `rows` as CSV with `headers` as the header line.
///
/// Values are written in header order. A header missing from a row is
/// written as an empty field; row columns not in `headers` are ignored.
/// Fields containing a comma, quote, CR or LF are quoted with embedded quotes
/// doubled, and lines end in CRLF. Output is byte-identical for identical
/// input.
///
/// # Errors
///
/// Returns `AppError::Internal` if the in-memory writer fails to flush.
pub fn encode_table(headers: &[String], rows: &[Row]) -> Result<String, AppError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::with_capacity(rows.len() * 64));

    writer
        .write_record(headers)
        .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

    for row in rows {
        writer
            .write_record(headers.iter().map(|h| row.get(h).unwrap_or("")))
            .map_err(|e| AppError::Internal(format!("Failed to write CSV record: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV writer: {}", e.error())))?;

    // Every field came from a &str, so the output is valid UTF-8.
    String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(format!("CSV output is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::decoder::parse_csv;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_values_follow_header_order() {
        let output = encode_table(
            &headers(&["b", "a"]),
            &[row(&[("a", "1"), ("b", "2")])],
        )
        .expect("encode");

        assert_eq!(output, "b,a\r\n2,1\r\n");
    }

    #[test]
    fn test_missing_columns_are_empty_and_extras_dropped() {
        let output = encode_table(
            &headers(&["amount", "name", "city"]),
            &[row(&[("amount", "5"), ("city", "Paris"), ("unknown", "zzz")])],
        )
        .expect("encode");

        assert_eq!(output, "amount,name,city\r\n5,,Paris\r\n");
        assert!(!output.contains("zzz"));
    }

    #[test]
    fn test_special_characters_are_quoted() {
        let output = encode_table(
            &headers(&["name", "desc"]),
            &[
                row(&[("name", "Doe, John"), ("desc", "plain")]),
                row(&[("name", "Has \"quotes\""), ("desc", "Multi\nline")]),
            ],
        )
        .expect("encode");

        assert_eq!(
            output,
            "name,desc\r\n\"Doe, John\",plain\r\n\"Has \"\"quotes\"\"\",\"Multi\nline\"\r\n"
        );
    }

    #[test]
    fn test_no_rows_writes_header_only() {
        let output = encode_table(&headers(&["amount", "_source_file"]), &[]).expect("encode");
        assert_eq!(output, "amount,_source_file\r\n");
    }

    #[test]
    fn test_output_is_deterministic() {
        let hdrs = headers(&["a", "b", "c"]);
        let rows: Vec<Row> = (0..50)
            .map(|i| {
                let id = i.to_string();
                row(&[
                    ("a", id.as_str()),
                    ("c", "x"),
                    ("b", if i % 2 == 0 { "even" } else { "odd" }),
                ])
            })
            .collect();

        let first = encode_table(&hdrs, &rows).expect("encode");
        let second = encode_table(&hdrs, &rows).expect("encode");
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_trip_through_decoder() {
        let hdrs = headers(&["amount", "name", "note"]);
        let original = vec![
            row(&[("amount", "10"), ("name", "Alice"), ("note", "a, b")]),
            row(&[("amount", "-3"), ("name", "Bob")]),
            row(&[("name", "Quote \"q\""), ("note", "two\nlines")]),
        ];

        let text = encode_table(&hdrs, &original).expect("encode");
        let decoded = parse_csv(text.as_bytes()).expect("decode");

        assert_eq!(decoded.headers, hdrs);
        assert_eq!(decoded.rows.len(), original.len());
        for (before, after) in original.iter().zip(&decoded.rows) {
            let non_empty: Vec<_> = after.iter().filter(|(_, v)| !v.is_empty()).collect();
            assert_eq!(non_empty.len(), before.len());
            for (column, value) in before.iter() {
                assert_eq!(after.get(column), Some(value));
            }
        }
    }
}
