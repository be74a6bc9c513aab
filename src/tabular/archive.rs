//! Zip packaging of the success and failure tables.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::AppError;

/// Archive entry holding rows that passed classification.
pub const SUCCESS_ENTRY: &str = "Success.csv";

/// Archive entry holding rows that failed classification.
pub const FAILURE_ENTRY: &str = "Failure.csv";

/// Builds an in-memory zip with exactly two deflated entries,
/// `Success.csv` followed by `Failure.csv`.
///
/// Entry timestamps are pinned to the zip epoch and permissions to 0644, so
/// identical tables always produce identical archive bytes.
///
/// # Errors
///
/// Returns `AppError::ArchiveFailed` if the zip writer fails.
pub fn build_archive(success_csv: &str, failure_csv: &str) -> Result<Vec<u8>, AppError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = entry_options();

    for (name, body) in [(SUCCESS_ENTRY, success_csv), (FAILURE_ENTRY, failure_csv)] {
        zip.start_file(name, options)
            .map_err(|e| AppError::ArchiveFailed(format!("Failed to start {}: {}", name, e)))?;
        zip.write_all(body.as_bytes())
            .map_err(|e| AppError::ArchiveFailed(format!("Failed to write {}: {}", name, e)))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| AppError::ArchiveFailed(format!("Failed to finish archive: {}", e)))?;

    Ok(cursor.into_inner())
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
}
