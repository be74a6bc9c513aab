//! Merge-classify-repackage pipeline.
//!
//! Turns an ordered list of base64 CSV uploads into a zip holding
//! `Success.csv` and `Failure.csv`. The whole run is synchronous and
//! all-or-nothing: any request-shape or decode error discards every partial
//! result.

mod input;
mod process;

pub use input::{InputFile, ProcessRequest};
pub use process::{process_files, ProcessedArchive, RESULTS_FILENAME, ZIP_MEDIA_TYPE};
