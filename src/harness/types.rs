use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::browser::DriverError;
use crate::credentials::{CredentialError, CredentialRow};

/// Which credential column feeds a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialField {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl CredentialField {
    /// Pull this column's value out of a credential row
    pub fn value<'a>(&self, row: &'a CredentialRow) -> &'a str {
        match self {
            CredentialField::Username => &row.username,
            CredentialField::Email => &row.email,
            CredentialField::Password => &row.password,
            CredentialField::ConfirmPassword => &row.confirm_password,
        }
    }
}

/// One form field: a stable element id and the credential column typed into it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Element id used to locate the field
    pub element_id: String,
    /// Credential column supplying the value
    pub source: CredentialField,
}

impl FieldSpec {
    pub fn new(element_id: &str, source: CredentialField) -> Self {
        Self {
            element_id: element_id.to_string(),
            source,
        }
    }
}

/// Configuration for one parametrized flow (signup, login, ...)
///
/// The same engine runs every flow; only the target URL, field map, locator
/// classes, and artifact stems differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSpec {
    /// Flow name used in logs and the run manifest
    pub name: String,

    /// Full URL of the page driven by this flow
    pub url: String,

    /// Ordered field map; fields are filled in this order
    pub fields: Vec<FieldSpec>,

    /// Style class locating the submit control
    pub submit_class: String,

    /// Style class locating the notification element
    pub toast_class: String,

    /// Screenshot stem for successful cases (release-namespaced)
    pub success_stem: String,

    /// Screenshot stem for failed cases (release-namespaced)
    pub failed_stem: String,

    /// Screenshot stem for detection errors (flat path, no release directory)
    pub error_stem: String,
}

impl FlowSpec {
    /// The signup flow of the hosted application
    pub fn signup(base_url: &str) -> Self {
        Self {
            name: "signup".to_string(),
            url: format!("{}/signup", base_url.trim_end_matches('/')),
            fields: vec![
                FieldSpec::new("username", CredentialField::Username),
                FieldSpec::new("email", CredentialField::Email),
                FieldSpec::new("password", CredentialField::Password),
                FieldSpec::new("confirmPassword", CredentialField::ConfirmPassword),
            ],
            submit_class: "sign-up".to_string(),
            toast_class: "Toastify__toast".to_string(),
            success_stem: "signup-success".to_string(),
            failed_stem: "signup-failed".to_string(),
            // Detection-error shots keep the flat login-error stem
            error_stem: "login-error".to_string(),
        }
    }

    /// The login flow of the hosted application
    pub fn login(base_url: &str) -> Self {
        Self {
            name: "login".to_string(),
            url: base_url.trim_end_matches('/').to_string(),
            fields: vec![
                FieldSpec::new("username", CredentialField::Username),
                FieldSpec::new("password", CredentialField::Password),
            ],
            submit_class: "login".to_string(),
            toast_class: "Toastify__toast".to_string(),
            success_stem: "login-success".to_string(),
            failed_stem: "login-failed".to_string(),
            error_stem: "login-error".to_string(),
        }
    }
}

/// The classification result of one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The notification carried the `success` style class
    Success,
    /// The notification appeared without the `success` style class
    Failed,
    /// The notification never appeared before the bounded wait elapsed
    Error,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "SUCCESS"),
            Outcome::Failed => write!(f, "FAILED"),
            Outcome::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    /// 1-based test index, assigned in file order
    pub index: usize,

    /// Three-way classification of the submission
    pub outcome: Outcome,

    /// Screenshot artifact, if one was written
    pub screenshot: Option<PathBuf>,

    /// Text content of the notification, if it appeared
    pub toast_text: Option<String>,
}

/// Manifest of a complete run, written as JSON next to the screenshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Flow name ("signup", "login")
    pub flow: String,

    /// Release tag namespacing the screenshot output
    pub release: String,

    /// Host the run executed on
    pub hostname: String,

    /// Run start time
    pub started: DateTime<Utc>,

    /// Run finish time (after teardown)
    pub finished: DateTime<Utc>,

    /// Per-case results in index order
    pub cases: Vec<CaseResult>,
}

/// Per-run state shared by the submitter and the classifier
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Resolved release tag (or the fallback placeholder)
    pub release: String,

    /// Root directory for screenshot output
    pub screenshot_root: PathBuf,
}

impl RunContext {
    pub fn new(release: impl Into<String>, screenshot_root: impl Into<PathBuf>) -> Self {
        Self {
            release: release.into(),
            screenshot_root: screenshot_root.into(),
        }
    }

    /// Release-namespaced directory for classified screenshots
    pub fn release_dir(&self) -> PathBuf {
        self.screenshot_root.join(&self.release)
    }
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Error types for harness operations
#[derive(Debug)]
pub enum HarnessError {
    /// Credential ingestion failed
    Credentials(CredentialError),

    /// Browser interaction failed
    Driver(DriverError),

    /// I/O error writing an artifact
    Io(std::io::Error),

    /// Manifest serialization error
    Serialization(serde_json::Error),
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Credentials(err) => write!(f, "Credential error: {}", err),
            HarnessError::Driver(err) => write!(f, "Driver error: {}", err),
            HarnessError::Io(err) => write!(f, "I/O error: {}", err),
            HarnessError::Serialization(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Credentials(err) => Some(err),
            HarnessError::Driver(err) => Some(err),
            HarnessError::Io(err) => Some(err),
            HarnessError::Serialization(err) => Some(err),
        }
    }
}

impl From<CredentialError> for HarnessError {
    fn from(err: CredentialError) -> Self {
        HarnessError::Credentials(err)
    }
}

impl From<DriverError> for HarnessError {
    fn from(err: DriverError) -> Self {
        HarnessError::Driver(err)
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        HarnessError::Io(err)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        HarnessError::Serialization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Success.to_string(), "SUCCESS");
        assert_eq!(Outcome::Failed.to_string(), "FAILED");
        assert_eq!(Outcome::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_outcome_serializes_screaming() {
        assert_eq!(serde_json::to_string(&Outcome::Success).unwrap(), "\"SUCCESS\"");
        assert_eq!(serde_json::to_string(&Outcome::Error).unwrap(), "\"ERROR\"");
    }

    #[test]
    fn test_signup_flow_spec() {
        let spec = FlowSpec::signup("https://app.example.com/");
        assert_eq!(spec.url, "https://app.example.com/signup");
        assert_eq!(spec.fields.len(), 4);
        assert_eq!(spec.fields[0].element_id, "username");
        assert_eq!(spec.fields[3].element_id, "confirmPassword");
        assert_eq!(spec.submit_class, "sign-up");
        assert_eq!(spec.toast_class, "Toastify__toast");
        assert_eq!(spec.error_stem, "login-error");
    }

    #[test]
    fn test_field_spec_pulls_from_row() {
        let row = crate::credentials::CredentialRow {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Pass123!".to_string(),
            confirm_password: "Pass123!".to_string(),
            extra: vec![],
        };
        assert_eq!(CredentialField::Email.value(&row), "alice@example.com");
        assert_eq!(CredentialField::ConfirmPassword.value(&row), "Pass123!");
    }

    #[test]
    fn test_release_dir() {
        let ctx = RunContext::new("v1.2.0", "screenshots");
        assert_eq!(ctx.release_dir(), PathBuf::from("screenshots/v1.2.0"));
    }
}
