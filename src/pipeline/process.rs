use tracing::{debug, info};

use super::InputFile;
use crate::error::AppError;
use crate::tabular::{
    build_archive, classify, decode_file, encode_table, ClassifiedRows, DecodedTable,
    MasterHeaders, Row,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Media type of the returned archive.
pub const ZIP_MEDIA_TYPE: &str = "application/zip";

/// Suggested download name for the returned archive.
pub const RESULTS_FILENAME: &str = "results.zip";

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Output of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessedArchive {
    /// Zip bytes containing `Success.csv` and `Failure.csv`.
    pub bytes: Vec<u8>,
    /// Header line shared by both tables.
    pub headers: Vec<String>,
    /// Number of rows written to `Success.csv`.
    pub success_rows: usize,
    /// Number of rows written to `Failure.csv`.
    pub failure_rows: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Runs the merge-classify-repackage pipeline over `files` in order.
///
/// File order decides both header precedence and row order. Every row is
/// stamped with its file's name under `_source_file`.
///
/// # Errors
///
/// - `AppError::NoFiles` if `files` is empty
/// - `AppError::MissingContent` as soon as a file without a payload is reached
/// - `AppError::InvalidBase64` if a payload does not decode
///
/// No partial archive is ever produced.
pub fn process_files(files: &[InputFile]) -> Result<ProcessedArchive, AppError> {
    if files.is_empty() {
        return Err(AppError::NoFiles);
    }

    let span = tracing::info_span!("process_files", files = files.len());
    let _guard = span.enter();

    let mut master_headers = MasterHeaders::new();
    let mut merged_rows: Vec<Row> = Vec::new();

    for (index, file) in files.iter().enumerate() {
        let payload = file
            .payload()
            .ok_or(AppError::MissingContent { index })?;

        let DecodedTable { headers, rows } = decode_file(&file.filename, payload)?;
        master_headers.merge(&headers);

        debug!(
            index,
            filename = %file.filename,
            rows = rows.len(),
            "Merged input file"
        );

        merged_rows.extend(rows.into_iter().map(|mut row| {
            row.set_source_file(&file.filename);
            row
        }));
    }

    let headers = master_headers.finish();
    let ClassifiedRows { success, failure } = classify(merged_rows);

    let success_csv = encode_table(&headers, &success)?;
    let failure_csv = encode_table(&headers, &failure)?;
    let bytes = build_archive(&success_csv, &failure_csv)?;

    info!(
        columns = headers.len(),
        success_rows = success.len(),
        failure_rows = failure.len(),
        archive_bytes = bytes.len(),
        "Built results archive"
    );

    Ok(ProcessedArchive {
        bytes,
        headers,
        success_rows: success.len(),
        failure_rows: failure.len(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
