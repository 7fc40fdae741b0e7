//! Auth Harness - data-driven browser testing of signup/login flows.
//!
//! This crate provides:
//! - CSV credential ingestion (one header row, data rows in file order)
//! - A WebDriver-backed browser session with a bounded element wait
//! - A parametrized flow engine (navigate, fill, submit) shared by all flows
//! - Toast-based outcome classification (SUCCESS / FAILED / ERROR) with
//!   release-namespaced screenshots and a JSON run manifest
//! - A scripted `MockDriver` for browserless testing
//!
//! # Example
//!
//! ```rust,no_run
//! use auth_harness::browser::{WebDriverConfig, WebDriverSession};
//! use auth_harness::credentials::read_credentials;
//! use auth_harness::harness::{run_flow, FlowSpec, RunContext};
//! use auth_harness::release::resolve_release_tag;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = read_credentials("test_data/registerData.csv")?;
//! let spec = FlowSpec::signup("https://ai-meeting-notes-ebon.vercel.app");
//! let ctx = RunContext::new(resolve_release_tag(), "screenshots");
//!
//! let mut driver = WebDriverSession::connect(&WebDriverConfig::default()).await?;
//! let report = run_flow(&mut driver, &spec, &rows, &ctx).await?;
//! println!("{} cases classified", report.outcomes.len());
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod config;
pub mod credentials;
pub mod harness;
pub mod release;

// Re-export credential types
pub use credentials::{read_credentials, CredentialError, CredentialResult, CredentialRow};

// Re-export browser types and drivers
pub use browser::{
    DriverError, DriverResult, FormDriver, MockDriver, Notification, WebDriverConfig,
    WebDriverSession,
};

// Re-export harness types and operations
pub use harness::{
    check_outcome, classify_class, run_flow, screenshot_name, submit_credentials, CaseResult,
    CredentialField, FieldSpec, FlowSpec, HarnessError, HarnessResult, Outcome, RunContext,
    RunReport, RunSummary,
};

// Re-export release tag resolution
pub use release::{resolve_release_tag, resolve_release_tag_in, FALLBACK_TAG};
