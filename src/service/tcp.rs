//! Single TCP reachability attempts.
//!
//! One attempt, name resolution and every resolved address included, is
//! bounded by a single deadline.

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs as _};
use std::sync::mpsc;
use std::time::{Duration, Instant};

pub const MIN_CONNECT_TIMEOUT: Duration = Duration::from_millis(10);
pub const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Bounds one connect attempt by what is left of the overall budget, so a
/// slow connect cannot hold the wait far past its deadline.
pub fn connect_timeout_for(remaining: Duration) -> Duration {
    remaining.clamp(MIN_CONNECT_TIMEOUT, MAX_CONNECT_TIMEOUT)
}

/// Time left for the next address, or `None` once the attempt deadline has
/// passed. Never below [`MIN_CONNECT_TIMEOUT`] while time remains.
fn address_timeout(deadline: Instant, now: Instant) -> Option<Duration> {
    if now >= deadline {
        return None;
    }
    Some(deadline.duration_since(now).max(MIN_CONNECT_TIMEOUT))
}

/// Connects to `host:port` and closes the stream straight away.
///
/// Resolved addresses are tried in order until one accepts or `timeout`
/// has been spent.
pub fn probe(host: &str, port: u16, timeout: Duration) -> io::Result<()> {
    let deadline = Instant::now() + timeout;
    let addrs = resolve(host, port, timeout)?;
    connect_any(host, port, addrs, deadline, |addr, timeout| {
        TcpStream::connect_timeout(addr, timeout).map(drop)
    })
}

pub async fn probe_async(host: &str, port: u16, timeout: Duration) -> io::Result<()> {
    match tokio::time::timeout(timeout, connect_first(host, port)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(timed_out(host, port, timeout)),
    }
}

async fn connect_first(host: &str, port: u16) -> io::Result<()> {
    let mut last_err = None;
    for addr in tokio::net::lookup_host((host, port)).await? {
        match tokio::net::TcpStream::connect(addr).await {
            Ok(_stream) => return Ok(()),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| no_addresses(host, port)))
}

/// std has no timeout knob for name resolution, so the lookup runs on a
/// helper thread and is abandoned once `timeout` passes.
fn resolve(host: &str, port: u16, timeout: Duration) -> io::Result<Vec<SocketAddr>> {
    if let Ok(ip) = host.parse::<std::net::IpAddr>() {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }

    let (tx, rx) = mpsc::channel();
    let target = host.to_string();
    std::thread::spawn(move || {
        let addrs = (target.as_str(), port)
            .to_socket_addrs()
            .map(|addrs| addrs.collect::<Vec<_>>());
        let _ = tx.send(addrs);
    });
    match rx.recv_timeout(timeout) {
        Ok(addrs) => addrs,
        Err(_) => Err(timed_out(host, port, timeout)),
    }
}

fn connect_any<A, C>(
    host: &str,
    port: u16,
    addrs: impl IntoIterator<Item = A>,
    deadline: Instant,
    mut connect: C,
) -> io::Result<()>
where
    C: FnMut(&A, Duration) -> io::Result<()>,
{
    let mut last_err = None;
    for addr in addrs {
        let Some(timeout) = address_timeout(deadline, Instant::now()) else {
            break;
        };
        match connect(&addr, timeout) {
            Ok(()) => return Ok(()),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| no_addresses(host, port)))
}

fn no_addresses(host: &str, port: u16) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no addresses resolved for {host}:{port}"),
    )
}

fn timed_out(host: &str, port: u16, timeout: Duration) -> io::Error {
    io::Error::new(
        io::ErrorKind::TimedOut,
        format!("connect to {host}:{port} timed out after {timeout:?}"),
    )
}
