//! Wait for a TCP service to start accepting connections.
//!
//! Failed attempts carry no detail, so a service timeout message never has
//! a `": ..."` suffix. DNS failures count as ordinary failed attempts.

mod options;
pub mod tcp;

use std::time::Instant;

use crate::wait::{
    PollOutcome, TimeoutError, WaitOptions, wait_for_condition, wait_for_condition_async,
};

pub use options::ServiceWaitOptions;

pub fn describe(service_name: &str, host: &str, port: u16) -> String {
    format!("{service_name} to become available on {host}, port {port}")
}

pub fn wait_for_service(
    service_name: &str,
    host: &str,
    port: u16,
    options: &ServiceWaitOptions,
) -> Result<(), TimeoutError> {
    let started = Instant::now();
    let budget = options.timeout;
    let check = |iteration: u64| {
        let timeout = tcp::connect_timeout_for(budget.saturating_sub(started.elapsed()));
        attempt_outcome(host, port, iteration, tcp::probe(host, port, timeout))
    };
    wait_for_condition(
        &describe(service_name, host, port),
        &WaitOptions::from(*options),
        check,
    )
}

pub async fn wait_for_service_async(
    service_name: &str,
    host: &str,
    port: u16,
    options: &ServiceWaitOptions,
) -> Result<(), TimeoutError> {
    let started = Instant::now();
    let budget = options.timeout;
    let check = move |iteration: u64| async move {
        let timeout = tcp::connect_timeout_for(budget.saturating_sub(started.elapsed()));
        attempt_outcome(host, port, iteration, tcp::probe_async(host, port, timeout).await)
    };
    wait_for_condition_async(
        &describe(service_name, host, port),
        &WaitOptions::from(*options),
        check,
    )
    .await
}

fn attempt_outcome(
    host: &str,
    port: u16,
    iteration: u64,
    result: std::io::Result<()>,
) -> PollOutcome {
    match result {
        Ok(()) => PollOutcome::ready(),
        Err(err) => {
            let address = format!("{host}:{port}");
            tracing::debug!(
                %address,
                iteration,
                error = %err,
                "connect attempt failed"
            );
            PollOutcome::pending()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt as _};
    use tracing_subscriber::{Layer, Registry};

    use super::*;

    #[derive(Clone, Default)]
    struct FieldNames(Arc<Mutex<Vec<String>>>);

    impl Visit for FieldNames {
        fn record_debug(&mut self, field: &Field, _value: &dyn std::fmt::Debug) {
            self.0.lock().unwrap().push(field.name().to_string());
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for FieldNames {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            event.record(&mut self.clone());
        }
    }

    #[test]
    fn description_names_service_host_and_port() {
        assert_eq!(
            describe("postgres", "db.local", 5432),
            "postgres to become available on db.local, port 5432"
        );
    }

    #[test]
    fn failed_attempts_have_no_detail() {
        let err = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        assert_eq!(
            attempt_outcome("127.0.0.1", 1, 0, Err(err)),
            PollOutcome::pending()
        );
        assert_eq!(
            attempt_outcome("127.0.0.1", 1, 0, Ok(())),
            PollOutcome::ready()
        );
    }

    #[test]
    fn failed_attempt_event_carries_address_iteration_and_error() {
        let names = FieldNames::default();
        let subscriber = Registry::default().with(names.clone());
        tracing::subscriber::with_default(subscriber, || {
            let err = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
            attempt_outcome("127.0.0.1", 1, 4, Err(err));
        });

        let mut names = names.0.lock().unwrap().clone();
        names.sort();
        assert_eq!(names, vec!["address", "error", "iteration", "message"]);
    }
}
