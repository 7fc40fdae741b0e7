pub mod mock;
pub mod types;
pub mod webdriver;

pub use mock::{MockDriver, ScriptedToast};
pub use types::{DriverError, DriverResult, FormDriver, Notification};
pub use webdriver::{WebDriverConfig, WebDriverSession};
