//! Poll a check with a constant delay until it succeeds or the timeout
//! elapses.
//!
//! The timeout is only evaluated after a check has run and before the
//! next sleep, so the first attempt always happens (even with a zero
//! timeout) and a wait may overshoot its nominal timeout by at most one
//! delay plus one check execution.

mod error;
mod options;
mod outcome;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::logger::{self, Logger};

pub use error::TimeoutError;
pub use options::{DEFAULT_DELAY, DEFAULT_TIMEOUT, WaitOptions};
pub(crate) use options::secs;
pub use outcome::PollOutcome;

/// Runs condition waits with fixed options.
///
/// Verbose progress goes to the injected logger if one was given, else to
/// the process-wide logger from [`crate::logger::logger`].
#[derive(Clone)]
pub struct ConditionWaiter {
    options: WaitOptions,
    logger: Option<Arc<dyn Logger>>,
}

impl ConditionWaiter {
    pub fn new(options: WaitOptions) -> Self {
        Self {
            options,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn options(&self) -> &WaitOptions {
        &self.options
    }

    pub fn wait<O, F>(&self, description: &str, mut check: F) -> Result<(), TimeoutError>
    where
        F: FnMut(u64) -> O,
        O: Into<PollOutcome>,
    {
        self.try_wait(description, |iteration| {
            Ok::<_, TimeoutError>(check(iteration))
        })
    }

    /// Like [`ConditionWaiter::wait`], but the check may fail. A check error
    /// stops the wait immediately and is returned as is.
    pub fn try_wait<O, E, F>(&self, description: &str, mut check: F) -> Result<(), E>
    where
        F: FnMut(u64) -> Result<O, E>,
        O: Into<PollOutcome>,
        E: From<TimeoutError>,
    {
        let progress = self.progress();
        progress.started(description, &self.options);

        let mut session = WaitSession::start();
        loop {
            let outcome: PollOutcome = check(session.iteration)?.into();
            match session.observe(outcome, description, &self.options) {
                Transition::Succeeded(elapsed) => {
                    progress.succeeded(description, elapsed);
                    return Ok(());
                }
                Transition::TimedOut(err) => return Err(err.into()),
                Transition::Sleeping(delay) => {
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
            }
        }
    }

    pub async fn wait_async<O, F, Fut>(
        &self,
        description: &str,
        mut check: F,
    ) -> Result<(), TimeoutError>
    where
        F: FnMut(u64) -> Fut,
        Fut: Future<Output = O>,
        O: Into<PollOutcome>,
    {
        let progress = self.progress();
        progress.started(description, &self.options);

        let mut session = WaitSession::start();
        loop {
            let outcome: PollOutcome = check(session.iteration).await.into();
            match session.observe(outcome, description, &self.options) {
                Transition::Succeeded(elapsed) => {
                    progress.succeeded(description, elapsed);
                    return Ok(());
                }
                Transition::TimedOut(err) => return Err(err),
                Transition::Sleeping(delay) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }

    fn progress(&self) -> Progress {
        if !self.options.verbose {
            return Progress(None);
        }
        Progress(Some(self.logger.clone().unwrap_or_else(logger::logger)))
    }
}

pub fn wait_for_condition<O, F>(
    description: &str,
    options: &WaitOptions,
    check: F,
) -> Result<(), TimeoutError>
where
    F: FnMut(u64) -> O,
    O: Into<PollOutcome>,
{
    ConditionWaiter::new(*options).wait(description, check)
}

pub fn try_wait_for_condition<O, E, F>(
    description: &str,
    options: &WaitOptions,
    check: F,
) -> Result<(), E>
where
    F: FnMut(u64) -> Result<O, E>,
    O: Into<PollOutcome>,
    E: From<TimeoutError>,
{
    ConditionWaiter::new(*options).try_wait(description, check)
}

pub async fn wait_for_condition_async<O, F, Fut>(
    description: &str,
    options: &WaitOptions,
    check: F,
) -> Result<(), TimeoutError>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = O>,
    O: Into<PollOutcome>,
{
    ConditionWaiter::new(*options)
        .wait_async(description, check)
        .await
}

enum Transition {
    Succeeded(Duration),
    Sleeping(Duration),
    TimedOut(TimeoutError),
}

struct WaitSession {
    started: Instant,
    iteration: u64,
}

impl WaitSession {
    fn start() -> Self {
        Self {
            started: Instant::now(),
            iteration: 0,
        }
    }

    fn observe(
        &mut self,
        outcome: PollOutcome,
        description: &str,
        options: &WaitOptions,
    ) -> Transition {
        let elapsed = self.started.elapsed();
        if outcome.success {
            return Transition::Succeeded(elapsed);
        }

        // only the final attempt's detail is reported
        if elapsed >= options.timeout {
            return Transition::TimedOut(TimeoutError::new(
                description,
                elapsed,
                outcome.detail,
            ));
        }

        self.iteration += 1;
        Transition::Sleeping(options.delay)
    }
}

struct Progress(Option<Arc<dyn Logger>>);

impl Progress {
    fn started(&self, description: &str, options: &WaitOptions) {
        if let Some(logger) = &self.0 {
            logger.info(&format!(
                "Waiting for {description} for up to {} seconds",
                options.timeout.as_secs_f64()
            ));
        }
    }

    fn succeeded(&self, description: &str, elapsed: Duration) {
        if let Some(logger) = &self.0 {
            logger.info(&format!(
                "Success waiting for {description} ({:.3} seconds)",
                elapsed.as_secs_f64()
            ));
        }
    }
}
