//! In-memory CSV handling for the merge-classify-repackage pipeline.
//!
//! This module decodes base64 CSV payloads into rows, reconciles headers
//! across files, classifies rows by their `amount` column, renders rows back
//! to CSV against a shared header list, and packages the two result tables
//! into a zip archive.

pub mod archive;
pub mod classifier;
pub mod decoder;
pub mod encoder;
pub mod headers;
mod row;

pub use archive::{build_archive, FAILURE_ENTRY, SUCCESS_ENTRY};
pub use classifier::{classify, is_success, ClassifiedRows};
pub use decoder::{decode_base64, decode_file, parse_csv, DecodedTable};
pub use encoder::encode_table;
pub use headers::MasterHeaders;
pub use row::Row;

/// Column stamped on every merged row with the name of the file it came from.
pub const SOURCE_FILE_COLUMN: &str = "_source_file";

/// Column whose numeric value decides between the success and failure tables.
pub const AMOUNT_COLUMN: &str = "amount";
