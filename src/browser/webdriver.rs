//! WebDriver-backed browser session.
//!
//! Owns one `fantoccini::Client` and one bounded-wait timeout for the
//! lifetime of a run. All element lookups go through the bounded wait, and
//! teardown closes the browser exactly once no matter how many times it is
//! requested.

use std::time::Duration;

use async_trait::async_trait;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::{Client, ClientBuilder, Locator};
use tracing::info;

use super::types::{DriverError, DriverResult, FormDriver, Notification};
use crate::config;

/// Configuration for a WebDriver session
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    /// WebDriver endpoint URL (chromedriver/geckodriver/selenium)
    pub webdriver_url: String,
    /// Bounded wait for element presence
    pub wait_timeout: Duration,
    /// Run with a visible browser window instead of headless
    pub headed: bool,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        let cfg = config::get();
        Self {
            webdriver_url: cfg.browser.webdriver_url.clone(),
            wait_timeout: Duration::from_secs(cfg.browser.wait_timeout),
            headed: false,
        }
    }
}

impl WebDriverConfig {
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            ..Default::default()
        }
    }

    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn headed(mut self, headed: bool) -> Self {
        self.headed = headed;
        self
    }
}

/// A live browser session behind a WebDriver endpoint
pub struct WebDriverSession {
    /// `None` once the session has been closed
    client: Option<Client>,
    wait_timeout: Duration,
}

impl WebDriverSession {
    /// Launch one browser instance and build the bounded-wait helper.
    pub async fn connect(config: &WebDriverConfig) -> DriverResult<Self> {
        let mut caps = serde_json::Map::new();
        caps.insert(
            "browserName".to_string(),
            serde_json::Value::String("chrome".to_string()),
        );
        if !config.headed {
            caps.insert(
                "goog:chromeOptions".to_string(),
                serde_json::json!({
                    "args": ["--headless=new", "--disable-gpu", "--window-size=1280,900"]
                }),
            );
        }

        let client = ClientBuilder::rustls()
            .map_err(|e| DriverError::Session(format!("TLS setup failed: {}", e)))?
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| DriverError::Session(e.to_string()))?;

        info!(webdriver = %config.webdriver_url, "Browser session established");

        Ok(Self {
            client: Some(client),
            wait_timeout: config.wait_timeout,
        })
    }

    fn client(&self) -> DriverResult<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| DriverError::Session("session already closed".to_string()))
    }

    /// Bounded wait for an element to be present.
    async fn wait_for(&self, locator: Locator<'_>) -> DriverResult<fantoccini::elements::Element> {
        let client = self.client()?;
        client
            .wait()
            .at_most(self.wait_timeout)
            .for_element(locator)
            .await
            .map_err(|e| map_cmd_error(e, self.wait_timeout))
    }
}

#[async_trait]
impl FormDriver for WebDriverSession {
    async fn goto(&mut self, url: &str) -> DriverResult<()> {
        info!(url, "Going to webpage");
        self.client()?
            .goto(url)
            .await
            .map_err(|e| map_cmd_error(e, self.wait_timeout))
    }

    async fn fill_field(&mut self, id: &str, value: &str) -> DriverResult<()> {
        let field = self.wait_for(Locator::Id(id)).await?;
        field
            .clear()
            .await
            .map_err(|e| map_cmd_error(e, self.wait_timeout))?;
        info!(field = id, "Cleared field");
        field
            .send_keys(value)
            .await
            .map_err(|e| map_cmd_error(e, self.wait_timeout))?;
        info!(field = id, value, "Sent keys to field");
        Ok(())
    }

    async fn click_submit(&mut self, class: &str) -> DriverResult<()> {
        let button = self
            .wait_for(Locator::Css(&format!(".{}", class)))
            .await?;
        button
            .click()
            .await
            .map_err(|e| map_cmd_error(e, self.wait_timeout))?;
        info!(class, "Clicked submit control");
        Ok(())
    }

    async fn wait_for_notification(&mut self, class: &str) -> DriverResult<Notification> {
        let toast = self
            .wait_for(Locator::Css(&format!(".{}", class)))
            .await?;
        let class_attr = toast
            .attr("class")
            .await
            .map_err(|e| map_cmd_error(e, self.wait_timeout))?
            .unwrap_or_default();
        let text = toast
            .text()
            .await
            .map_err(|e| map_cmd_error(e, self.wait_timeout))?;
        Ok(Notification { class_attr, text })
    }

    async fn screenshot(&mut self) -> DriverResult<Vec<u8>> {
        self.client()?
            .screenshot()
            .await
            .map_err(|e| map_cmd_error(e, self.wait_timeout))
    }

    async fn close(&mut self) -> DriverResult<()> {
        if let Some(client) = self.client.take() {
            client
                .close()
                .await
                .map_err(|e| map_cmd_error(e, self.wait_timeout))?;
            info!("Browser closed");
        }
        Ok(())
    }
}

/// Translate fantoccini errors into explicit driver error kinds.
fn map_cmd_error(err: CmdError, wait: Duration) -> DriverError {
    match err {
        CmdError::WaitTimeout => DriverError::WaitTimeout(wait),
        CmdError::Standard(e) if e.error == ErrorStatus::NoSuchElement => {
            DriverError::NotFound(e.to_string())
        }
        other => DriverError::Command(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webdriver_config_builder() {
        let config = WebDriverConfig::new("http://localhost:9515")
            .wait_timeout(Duration::from_secs(3))
            .headed(true);
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.wait_timeout, Duration::from_secs(3));
        assert!(config.headed);
    }

    #[test]
    fn test_map_cmd_error_wait_timeout() {
        let mapped = map_cmd_error(CmdError::WaitTimeout, Duration::from_secs(10));
        assert!(matches!(mapped, DriverError::WaitTimeout(d) if d == Duration::from_secs(10)));
    }
}
