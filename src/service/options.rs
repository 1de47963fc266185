use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::wait::{DEFAULT_DELAY, DEFAULT_TIMEOUT, WaitOptions, secs};

/// Options for [`super::wait_for_service`]. There is deliberately no
/// verbose flag: service waits never emit progress lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceWaitOptions {
    #[serde(rename = "timeout_secs", with = "secs")]
    pub timeout: Duration,
    #[serde(rename = "delay_secs", with = "secs")]
    pub delay: Duration,
}

impl Default for ServiceWaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_DELAY,
        }
    }
}

impl ServiceWaitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl From<ServiceWaitOptions> for WaitOptions {
    fn from(opts: ServiceWaitOptions) -> Self {
        WaitOptions::new()
            .with_timeout(opts.timeout)
            .with_delay(opts.delay)
            .with_verbose(false)
    }
}
