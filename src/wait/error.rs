use std::time::Duration;

use thiserror::Error;

/// The time budget of a wait ran out before the check succeeded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Timed out waiting for {description} ({secs:.3} seconds){suffix}",
    secs = .elapsed.as_secs_f64(),
    suffix = detail_suffix(.detail.as_deref())
)]
pub struct TimeoutError {
    pub description: String,
    pub elapsed: Duration,
    pub detail: Option<String>,
}

impl TimeoutError {
    pub fn new(description: impl Into<String>, elapsed: Duration, detail: Option<String>) -> Self {
        Self {
            description: description.into(),
            elapsed,
            detail: detail.filter(|d| !d.is_empty()),
        }
    }
}

fn detail_suffix(detail: Option<&str>) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => format!(": {detail}"),
        _ => String::new(),
    }
}
