//! Credential ingestion from delimited test-data files.
//!
//! One CSV file drives one run: a single header row followed by data rows of
//! `username,email,password,confirmPassword[,...]`. Rows are kept in file
//! order and never validated beyond shape; contents go to the form verbatim.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One record of signup/login input fields read from the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRow {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Trailing fields beyond the four the signup flow uses. Preserved, unused.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

/// Result type for credential operations
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Error types for credential ingestion
#[derive(Debug)]
pub enum CredentialError {
    /// The data file could not be opened
    Open(std::io::Error),
    /// The reader failed mid-file
    Read(csv::Error),
    /// A data row had fewer than the four required fields
    ShortRow { line: u64, got: usize },
}

impl std::fmt::Display for CredentialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialError::Open(err) => write!(f, "Failed to open credential file: {}", err),
            CredentialError::Read(err) => write!(f, "Failed to read credential file: {}", err),
            CredentialError::ShortRow { line, got } => {
                write!(f, "Row at line {} has {} fields, expected at least 4", line, got)
            }
        }
    }
}

impl std::error::Error for CredentialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CredentialError::Open(err) => Some(err),
            CredentialError::Read(err) => Some(err),
            CredentialError::ShortRow { .. } => None,
        }
    }
}

impl From<csv::Error> for CredentialError {
    fn from(err: csv::Error) -> Self {
        CredentialError::Read(err)
    }
}

/// Read all credential rows from a CSV file, skipping exactly one header row.
///
/// The file handle is scoped to this call and closed on return. Order is file
/// order. Rows with trailing extra fields are accepted; rows with fewer than
/// four fields are rejected with [`CredentialError::ShortRow`].
pub fn read_credentials(path: impl AsRef<Path>) -> CredentialResult<Vec<CredentialRow>> {
    let file = File::open(path.as_ref()).map_err(CredentialError::Open)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if record.len() < 4 {
            return Err(CredentialError::ShortRow {
                line,
                got: record.len(),
            });
        }
        rows.push(CredentialRow {
            username: record[0].to_string(),
            email: record[1].to_string(),
            password: record[2].to_string(),
            confirm_password: record[3].to_string(),
            extra: record.iter().skip(4).map(str::to_string).collect(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes()).expect("Failed to write temp file");
        file
    }

    #[test]
    fn test_reads_rows_in_file_order() {
        let file = write_csv(
            "username,email,password,confirmPassword\n\
             alice,alice@example.com,Pass123!,Pass123!\n\
             bob,bob@example.com,Hunter2!,Hunter2!\n\
             carol,carol@example.com,Secret9!,Secret9!\n",
        );

        let rows = read_credentials(file.path()).expect("read failed");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].username, "alice");
        assert_eq!(rows[1].username, "bob");
        assert_eq!(rows[2].username, "carol");
        assert_eq!(rows[0].email, "alice@example.com");
        assert_eq!(rows[0].confirm_password, "Pass123!");
    }

    #[test]
    fn test_header_row_is_skipped() {
        let file = write_csv("username,email,password,confirmPassword\n");
        let rows = read_credentials(file.path()).expect("read failed");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_trailing_fields_are_preserved() {
        let file = write_csv(
            "username,email,password,confirmPassword,note\n\
             dave,dave@example.com,Pw1,Pw1,expected-failure\n",
        );
        let rows = read_credentials(file.path()).expect("read failed");
        assert_eq!(rows[0].extra, vec!["expected-failure".to_string()]);
    }

    #[test]
    fn test_short_row_is_rejected() {
        let file = write_csv(
            "username,email,password,confirmPassword\n\
             eve,eve@example.com\n",
        );
        match read_credentials(file.path()) {
            Err(CredentialError::ShortRow { got, .. }) => assert_eq!(got, 2),
            other => panic!("Expected ShortRow, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_propagates() {
        let err = read_credentials("/nonexistent/registerData.csv").unwrap_err();
        assert!(matches!(err, CredentialError::Open(_)));
    }
}
