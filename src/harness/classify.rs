//! Outcome classification from the notification element.
//!
//! Classification is string containment on the toast's style class: any class
//! attribute containing `success` is a SUCCESS, any other toast is a FAILED,
//! and a toast that never appears before the bounded wait elapses is an
//! ERROR. Success and failure screenshots land in the release-namespaced
//! directory; detection-error screenshots go to a flat, non-namespaced path.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::browser::{DriverError, FormDriver};
use crate::harness::types::{CaseResult, FlowSpec, HarnessResult, Outcome, RunContext};

/// Substring of the toast class attribute that marks a successful submission
pub const SUCCESS_CLASS_MARKER: &str = "success";

/// Classify a toast's class attribute.
pub fn classify_class(class_attr: &str) -> Outcome {
    if class_attr.contains(SUCCESS_CLASS_MARKER) {
        Outcome::Success
    } else {
        Outcome::Failed
    }
}

/// Screenshot file name for a given artifact stem and 1-based test index.
pub fn screenshot_name(stem: &str, index: usize) -> String {
    format!("{}-{}.png", stem, index)
}

/// Wait for the notification element, classify it, and persist the screenshot.
///
/// Detection errors (timeout, vanished element, any other command failure
/// before classification) are recovered locally: the case is downgraded to
/// [`Outcome::Error`], a screenshot is attempted at the flat error path, and
/// nothing is re-raised. Only a failure to create the release directory
/// propagates.
pub async fn check_outcome(
    driver: &mut dyn FormDriver,
    spec: &FlowSpec,
    index: usize,
    ctx: &RunContext,
) -> HarnessResult<CaseResult> {
    let release_dir = ctx.release_dir();
    fs::create_dir_all(&release_dir)?;

    match driver.wait_for_notification(&spec.toast_class).await {
        Ok(notification) => {
            let outcome = classify_class(&notification.class_attr);
            let stem = match outcome {
                Outcome::Success => {
                    info!(flow = %spec.name, index, "Submission was successful");
                    &spec.success_stem
                }
                _ => {
                    error!(flow = %spec.name, index, "Submission was unsuccessful");
                    &spec.failed_stem
                }
            };

            let path = release_dir.join(screenshot_name(stem, index));
            match save_screenshot(driver, &path).await {
                Ok(()) => {
                    info!(path = %path.display(), "Screenshot saved");
                    info!(text = %notification.text, "Toast message");
                    Ok(CaseResult {
                        index,
                        outcome,
                        screenshot: Some(path),
                        toast_text: Some(notification.text),
                    })
                }
                Err(err) => {
                    error!(%err, index, "Screenshot capture failed after classification");
                    Ok(error_case(driver, spec, index, Some(notification.text)).await)
                }
            }
        }
        Err(err) => {
            match &err {
                DriverError::WaitTimeout(d) => {
                    error!(index, timeout = ?d, "Notification did not appear before timeout")
                }
                DriverError::NotFound(msg) => {
                    error!(index, %msg, "Notification element not found")
                }
                other => error!(index, %other, "Error checking submission result"),
            }
            Ok(error_case(driver, spec, index, None).await)
        }
    }
}

/// Build the ERROR case, attempting a screenshot at the flat error path.
async fn error_case(
    driver: &mut dyn FormDriver,
    spec: &FlowSpec,
    index: usize,
    toast_text: Option<String>,
) -> CaseResult {
    let path = PathBuf::from(screenshot_name(&spec.error_stem, index));
    let screenshot = match save_screenshot(driver, &path).await {
        Ok(()) => Some(path),
        Err(err) => {
            warn!(%err, index, "Error screenshot could not be captured");
            None
        }
    };
    CaseResult {
        index,
        outcome: Outcome::Error,
        screenshot,
        toast_text,
    }
}

/// Capture the viewport and write it to `path`, logging the PNG dimensions
/// when the capture decodes.
async fn save_screenshot(driver: &mut dyn FormDriver, path: &Path) -> HarnessResult<()> {
    let bytes = driver.screenshot().await?;
    fs::write(path, &bytes)?;
    if let Ok(img) = image::load_from_memory(&bytes) {
        debug!(path = %path.display(), width = img.width(), height = img.height(), "Capture decoded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_success_class() {
        assert_eq!(classify_class("Toastify__toast success"), Outcome::Success);
        assert_eq!(
            classify_class("Toastify__toast Toastify__toast--success"),
            Outcome::Success
        );
    }

    #[test]
    fn test_classify_non_success_class() {
        assert_eq!(classify_class("Toastify__toast error"), Outcome::Failed);
        assert_eq!(classify_class("Toastify__toast"), Outcome::Failed);
        assert_eq!(classify_class(""), Outcome::Failed);
    }

    #[test]
    fn test_screenshot_name() {
        assert_eq!(screenshot_name("signup-success", 1), "signup-success-1.png");
        assert_eq!(screenshot_name("signup-failed", 12), "signup-failed-12.png");
        assert_eq!(screenshot_name("login-error", 3), "login-error-3.png");
    }

    #[tokio::test]
    async fn test_check_outcome_success_writes_versioned_screenshot() {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let ctx = RunContext::new("v1.0.0", tmp.path());
        let spec = FlowSpec::signup("https://app.example.com");
        let mut driver = crate::browser::MockDriver::new()
            .push_toast("Toastify__toast success", "Account created");

        let case = check_outcome(&mut driver, &spec, 1, &ctx).await.unwrap();
        assert_eq!(case.outcome, Outcome::Success);

        let expected = tmp.path().join("v1.0.0").join("signup-success-1.png");
        assert_eq!(case.screenshot.as_deref(), Some(expected.as_path()));
        assert!(expected.exists(), "Screenshot file not created");
        assert_eq!(case.toast_text.as_deref(), Some("Account created"));
    }

    #[tokio::test]
    async fn test_check_outcome_failed_writes_failed_screenshot() {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let ctx = RunContext::new("v0.0.0", tmp.path());
        let spec = FlowSpec::signup("https://app.example.com");
        let mut driver = crate::browser::MockDriver::new()
            .push_toast("Toastify__toast error", "Username already taken");

        let case = check_outcome(&mut driver, &spec, 2, &ctx).await.unwrap();
        assert_eq!(case.outcome, Outcome::Failed);
        assert!(tmp.path().join("v0.0.0").join("signup-failed-2.png").exists());
    }
}
