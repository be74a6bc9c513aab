//! Master header reconciliation across input files.

use std::collections::HashSet;

use super::SOURCE_FILE_COLUMN;

/// Insertion-ordered set of column names accumulated across input files.
///
/// Both output tables are written against the finished list, so they share
/// one schema even when the inputs have different or overlapping columns.
#[derive(Debug, Clone, Default)]
pub struct MasterHeaders {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl MasterHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every header not seen before, keeping first-seen order.
    pub fn merge<S: AsRef<str>>(&mut self, headers: &[S]) {
        for header in headers {
            let header = header.as_ref();
            if self.seen.insert(header.to_string()) {
                self.order.push(header.to_string());
            }
        }
    }

    pub fn contains(&self, header: &str) -> bool {
        self.seen.contains(header)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Appends the provenance column unless an input already declared it,
    /// and returns the final header list.
    pub fn finish(mut self) -> Vec<String> {
        self.merge(&[SOURCE_FILE_COLUMN]);
        self.order
    }
}
