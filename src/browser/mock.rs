//! Scripted driver for browserless test runs.
//!
//! `MockDriver` plays the browser's part without a WebDriver endpoint:
//! interactions are recorded, toast responses are scripted per submission,
//! and screenshots are synthesized as solid-color PNGs.

use std::collections::VecDeque;
use std::io::Cursor;

use async_trait::async_trait;
use image::RgbImage;

use super::types::{DriverError, DriverResult, FormDriver, Notification};

/// Scripted response to one form submission
#[derive(Debug, Clone)]
pub enum ScriptedToast {
    /// The notification appears with this class attribute and text
    Appears { class_attr: String, text: String },
    /// No notification appears before the bounded wait elapses
    Absent,
}

/// A scripted browser driver for testing
///
/// Responses are consumed in submission order: the first
/// `wait_for_notification` call pops the first scripted toast, and so on.
/// An exhausted script behaves like a timeout.
#[derive(Debug, Default)]
pub struct MockDriver {
    /// URLs visited, in order
    pub visited: Vec<String>,
    /// (element id, typed value) pairs, in order
    pub filled: Vec<(String, String)>,
    /// Submit classes clicked, in order
    pub clicked: Vec<String>,
    /// Number of times `close` was called
    pub close_calls: usize,
    /// Element id that should fail to fill, if any
    fail_field: Option<String>,
    /// Typed value that should fail to fill, if any
    fail_value: Option<String>,
    /// Scripted toast responses, consumed front to back
    toasts: VecDeque<ScriptedToast>,
    /// Wait timeout reported in timeout errors
    wait_timeout: std::time::Duration,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            wait_timeout: std::time::Duration::from_secs(10),
            ..Default::default()
        }
    }

    /// Script a toast for the next unanswered submission
    pub fn push_toast(mut self, class_attr: &str, text: &str) -> Self {
        self.toasts.push_back(ScriptedToast::Appears {
            class_attr: class_attr.to_string(),
            text: text.to_string(),
        });
        self
    }

    /// Script a missing toast (bounded wait elapses) for the next submission
    pub fn push_absent(mut self) -> Self {
        self.toasts.push_back(ScriptedToast::Absent);
        self
    }

    /// Make every fill of the given element id fail as not-found
    pub fn fail_on_field(mut self, id: &str) -> Self {
        self.fail_field = Some(id.to_string());
        self
    }

    /// Make any fill typing the given value fail as not-found
    pub fn fail_on_value(mut self, value: &str) -> Self {
        self.fail_value = Some(value.to_string());
        self
    }

    /// Synthesize a small solid-color PNG standing in for a viewport capture
    fn render_png() -> DriverResult<Vec<u8>> {
        let img = RgbImage::from_pixel(64, 48, image::Rgb([30, 30, 46]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| DriverError::Command(format!("Failed to encode PNG: {}", e)))?;
        Ok(bytes)
    }
}

#[async_trait]
impl FormDriver for MockDriver {
    async fn goto(&mut self, url: &str) -> DriverResult<()> {
        self.visited.push(url.to_string());
        Ok(())
    }

    async fn fill_field(&mut self, id: &str, value: &str) -> DriverResult<()> {
        if self.fail_field.as_deref() == Some(id) || self.fail_value.as_deref() == Some(value) {
            return Err(DriverError::NotFound(format!("no element with id '{}'", id)));
        }
        self.filled.push((id.to_string(), value.to_string()));
        Ok(())
    }

    async fn click_submit(&mut self, class: &str) -> DriverResult<()> {
        self.clicked.push(class.to_string());
        Ok(())
    }

    async fn wait_for_notification(&mut self, _class: &str) -> DriverResult<Notification> {
        match self.toasts.pop_front() {
            Some(ScriptedToast::Appears { class_attr, text }) => {
                Ok(Notification { class_attr, text })
            }
            Some(ScriptedToast::Absent) | None => Err(DriverError::WaitTimeout(self.wait_timeout)),
        }
    }

    async fn screenshot(&mut self) -> DriverResult<Vec<u8>> {
        Self::render_png()
    }

    async fn close(&mut self) -> DriverResult<()> {
        self.close_calls += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_toasts_consumed_in_order() {
        let mut driver = MockDriver::new()
            .push_toast("Toastify__toast success", "Account created")
            .push_absent();

        let first = driver.wait_for_notification("Toastify__toast").await.unwrap();
        assert_eq!(first.class_attr, "Toastify__toast success");

        let second = driver.wait_for_notification("Toastify__toast").await;
        assert!(matches!(second, Err(DriverError::WaitTimeout(_))));
    }

    #[tokio::test]
    async fn test_screenshot_is_decodable_png() {
        let mut driver = MockDriver::new();
        let bytes = driver.screenshot().await.unwrap();
        let img = image::load_from_memory(&bytes).expect("Failed to decode PNG");
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 48);
    }

    #[tokio::test]
    async fn test_fail_on_field() {
        let mut driver = MockDriver::new().fail_on_field("email");
        assert!(driver.fill_field("username", "alice").await.is_ok());
        let err = driver.fill_field("email", "alice@example.com").await;
        assert!(matches!(err, Err(DriverError::NotFound(_))));
    }
}
