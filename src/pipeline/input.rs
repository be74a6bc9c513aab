use serde::{Deserialize, Serialize};

/// Request body for `POST /process`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessRequest {
    /// Absent and `null` are both treated as an empty list.
    #[serde(default)]
    pub files: Option<Vec<InputFile>>,
}

impl ProcessRequest {
    pub fn into_files(self) -> Vec<InputFile> {
        self.files.unwrap_or_default()
    }
}

/// One uploaded CSV file.
///
/// On the wire the payload may be spelled `content_base64` or
/// `contentBase64`; deserialization normalizes both to `content_base64`.
/// An empty payload string counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawInputFile")]
pub struct InputFile {
    /// Display name stamped on every row from this file. May be empty.
    pub filename: String,
    /// Base64-encoded CSV bytes.
    pub content_base64: Option<String>,
}

impl InputFile {
    pub fn new(filename: impl Into<String>, content_base64: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content_base64: Some(content_base64.into()),
        }
    }

    /// Returns the payload, treating an empty string as absent.
    pub fn payload(&self) -> Option<&str> {
        self.content_base64.as_deref().filter(|p| !p.is_empty())
    }
}

/// Wire shape accepting both payload spellings.
#[derive(Deserialize)]
struct RawInputFile {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    content_base64: Option<String>,
    #[serde(default, rename = "contentBase64")]
    content_base64_camel: Option<String>,
}

impl From<RawInputFile> for InputFile {
    fn from(raw: RawInputFile) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            filename: raw.filename.unwrap_or_default(),
            content_base64: non_empty(raw.content_base64)
                .or_else(|| non_empty(raw.content_base64_camel)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ProcessRequest {
        serde_json::from_str(json).expect("Failed to parse request")
    }

    #[test]
    fn test_snake_case_payload() {
        let files = parse(r#"{"files":[{"filename":"a.csv","content_base64":"YQ=="}]}"#)
            .into_files();

        assert_eq!(files, vec![InputFile::new("a.csv", "YQ==")]);
    }

    #[test]
    fn test_camel_case_payload_is_normalized() {
        let files = parse(r#"{"files":[{"filename":"a.csv","contentBase64":"YQ=="}]}"#)
            .into_files();

        assert_eq!(files[0].payload(), Some("YQ=="));
    }

    #[test]
    fn test_snake_case_wins_when_both_present() {
        let files = parse(
            r#"{"files":[{"content_base64":"c25ha2U=","contentBase64":"Y2FtZWw="}]}"#,
        )
        .into_files();

        assert_eq!(files[0].payload(), Some("c25ha2U="));
    }

    #[test]
    fn test_empty_snake_case_falls_back_to_camel_case() {
        let files = parse(r#"{"files":[{"content_base64":"","contentBase64":"YQ=="}]}"#)
            .into_files();

        assert_eq!(files[0].payload(), Some("YQ=="));
    }

    #[test]
    fn test_missing_and_empty_payloads_are_none() {
        let files = parse(
            r#"{"files":[{"filename":"a.csv"},{"filename":"b.csv","content_base64":""},{"content_base64":null}]}"#,
        )
        .into_files();

        assert!(files.iter().all(|f| f.payload().is_none()));
    }

    #[test]
    fn test_missing_or_null_filename_is_empty() {
        let files = parse(r#"{"files":[{"content_base64":"YQ=="},{"filename":null,"content_base64":"YQ=="}]}"#)
            .into_files();

        assert!(files.iter().all(|f| f.filename.is_empty()));
    }

    #[test]
    fn test_missing_or_null_files_is_empty_list() {
        assert!(parse("{}").into_files().is_empty());
        assert!(parse(r#"{"files":null}"#).into_files().is_empty());
        assert!(parse(r#"{"files":[]}"#).into_files().is_empty());
    }
}
