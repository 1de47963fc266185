/// Result of a single check invocation.
///
/// `success` alone decides whether polling stops. `detail` is reported in
/// the timeout message and never affects control flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollOutcome {
    pub success: bool,
    pub detail: Option<String>,
}

impl PollOutcome {
    pub fn new(success: bool) -> Self {
        Self {
            success,
            detail: None,
        }
    }

    pub fn with_detail(success: bool, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            success,
            detail: (!detail.is_empty()).then_some(detail),
        }
    }

    pub fn ready() -> Self {
        Self::new(true)
    }

    pub fn pending() -> Self {
        Self::new(false)
    }
}

impl From<bool> for PollOutcome {
    fn from(success: bool) -> Self {
        Self::new(success)
    }
}

impl From<(bool, &str)> for PollOutcome {
    fn from((success, detail): (bool, &str)) -> Self {
        Self::with_detail(success, detail)
    }
}

impl From<(bool, String)> for PollOutcome {
    fn from((success, detail): (bool, String)) -> Self {
        Self::with_detail(success, detail)
    }
}

impl<S: Into<String>> From<(bool, Option<S>)> for PollOutcome {
    fn from((success, detail): (bool, Option<S>)) -> Self {
        match detail {
            Some(detail) => Self::with_detail(success, detail),
            None => Self::new(success),
        }
    }
}
