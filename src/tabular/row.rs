use std::collections::HashMap;

use super::SOURCE_FILE_COLUMN;

/// One data row: column name to raw string value.
///
/// Rows carry no identity beyond their position in the merged sequence.
/// Lookups are total: an absent column is `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `column`, if any.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Sets `column` to `value`, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Stamps the row with the file it came from.
    ///
    /// Overwrites a `_source_file` value the input itself may have declared.
    pub fn set_source_file(&mut self, filename: &str) {
        self.insert(SOURCE_FILE_COLUMN, filename);
    }

    pub fn source_file(&self) -> Option<&str> {
        self.get(SOURCE_FILE_COLUMN)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(column, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
