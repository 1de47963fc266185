//! Process-wide logger used for verbose progress lines.
//!
//! The default forwards to `tracing`, so nothing is printed until a
//! subscriber is installed (see [`crate::logging::init`]).

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

pub trait Logger: Send + Sync {
    fn info(&self, message: &str);

    /// Not used by the waiters themselves; available to callers sharing the logger.
    fn warn(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}

static LOGGER: LazyLock<RwLock<Arc<dyn Logger>>> = LazyLock::new(|| RwLock::new(default_logger()));

fn default_logger() -> Arc<dyn Logger> {
    Arc::new(TracingLogger)
}

/// Returns the logger currently installed for the process.
pub fn logger() -> Arc<dyn Logger> {
    LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the process-wide logger, returning the previous one.
pub fn set_logger(logger: Arc<dyn Logger>) -> Arc<dyn Logger> {
    let mut slot = LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, logger)
}

/// Restores the default `tracing`-backed logger.
pub fn reset_logger() {
    set_logger(default_logger());
}
