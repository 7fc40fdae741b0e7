//! Driver abstraction for browser-backed form interaction.
//!
//! The harness talks to the browser through [`FormDriver`] so the same flow
//! engine runs against a real WebDriver session or the scripted
//! [`MockDriver`](crate::browser::MockDriver) in tests.

use std::time::Duration;

use async_trait::async_trait;

/// The UI toast whose presence and style class communicate the submission result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Full value of the element's `class` attribute
    pub class_attr: String,
    /// Visible text content of the toast
    pub text: String,
}

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Error types for driver operations
#[derive(Debug)]
pub enum DriverError {
    /// Could not establish or configure the browser session
    Session(String),

    /// A bounded wait elapsed without the condition becoming true
    WaitTimeout(Duration),

    /// An element lookup found nothing
    NotFound(String),

    /// Any other WebDriver command failure
    Command(String),

    /// I/O error while persisting an artifact
    Io(std::io::Error),
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Session(msg) => write!(f, "Session error: {}", msg),
            DriverError::WaitTimeout(d) => write!(f, "Wait timed out after {:?}", d),
            DriverError::NotFound(msg) => write!(f, "Element not found: {}", msg),
            DriverError::Command(msg) => write!(f, "WebDriver command failed: {}", msg),
            DriverError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        DriverError::Io(err)
    }
}

/// Trait for browser drivers
///
/// Implementations provide different ways of driving the form under test:
/// - `WebDriverSession` for a real browser behind a WebDriver endpoint
/// - `MockDriver` for scripted, browserless test runs
#[async_trait]
pub trait FormDriver: Send {
    /// Navigate the session to a URL
    async fn goto(&mut self, url: &str) -> DriverResult<()>;

    /// Locate a field by element id within the bounded wait, clear it, and
    /// type the given value
    async fn fill_field(&mut self, id: &str, value: &str) -> DriverResult<()>;

    /// Locate the submit control by style class within the bounded wait and
    /// activate it
    async fn click_submit(&mut self, class: &str) -> DriverResult<()>;

    /// Wait up to the bounded timeout for a notification element with the
    /// given style class to appear
    async fn wait_for_notification(&mut self, class: &str) -> DriverResult<Notification>;

    /// Capture the current viewport as PNG bytes
    async fn screenshot(&mut self) -> DriverResult<Vec<u8>>;

    /// Tear the session down. Safe to call more than once; only the first
    /// call closes the browser.
    async fn close(&mut self) -> DriverResult<()>;
}
