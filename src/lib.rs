//! Poll a condition until it holds or a deadline passes, and wait for TCP
//! services to start accepting connections.

pub mod logger;
pub mod logging;
pub mod service;
pub mod wait;

pub use logger::{Logger, NoopLogger, TracingLogger};
pub use service::{ServiceWaitOptions, wait_for_service, wait_for_service_async};
pub use wait::{
    ConditionWaiter, PollOutcome, TimeoutError, WaitOptions, try_wait_for_condition,
    wait_for_condition, wait_for_condition_async,
};
