use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Parser as _;
use svc_wait::{ServiceWaitOptions, wait_for_service};

#[derive(Debug, clap::Parser)]
struct Args {
    /// Name used in log and error messages.
    service_name: String,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    #[arg(long, default_value_t = 60.0)]
    timeout_secs: f64,

    #[arg(long, default_value_t = 1.0)]
    delay_secs: f64,
}

fn main() -> Result<()> {
    svc_wait::logging::init().ok();

    let args = Args::parse();
    let timeout = Duration::try_from_secs_f64(args.timeout_secs).context("parse timeout_secs")?;
    let delay = Duration::try_from_secs_f64(args.delay_secs).context("parse delay_secs")?;
    let options = ServiceWaitOptions::new()
        .with_timeout(timeout)
        .with_delay(delay);

    tracing::info!(
        service = %args.service_name,
        host = %args.host,
        port = args.port,
        timeout_secs = args.timeout_secs,
        "waiting for service"
    );
    wait_for_service(&args.service_name, &args.host, args.port, &options)?;
    tracing::info!(service = %args.service_name, "service available");

    Ok(())
}
