//! Blocking connection setup. Workers and the master both take a plain
//! `std::net::TcpStream` once connected; only the master's response
//! collection switches to non-blocking mio afterward.

use std::net::{TcpListener, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Error;

/// Connects to `addr`, retrying with backoff since a worker may not have
/// started listening yet by the time the master dials it.
pub fn connect_with_retry<A: ToSocketAddrs + Clone + std::fmt::Debug>(
    addr: A,
    attempts: u32,
    retry_delay: Duration,
) -> Result<TcpStream, Error> {
    let mut last_err = None;
    for attempt in 1..=attempts {
        match TcpStream::connect(addr.clone()) {
            Ok(stream) => {
                stream.set_nodelay(true)?;
                return Ok(stream);
            }
            Err(e) => {
                debug!(?addr, attempt, attempts, error = %e, "connect attempt failed, retrying");
                last_err = Some(e);
                std::thread::sleep(retry_delay);
            }
        }
    }
    let err = last_err.expect("attempts >= 1 guarantees at least one failed connect");
    warn!(?addr, attempts, "exhausted connect retries");
    Err(Error::Io(err))
}

/// Binds a listener for a worker to accept the master's connection on.
pub fn bind(addr: impl ToSocketAddrs) -> Result<TcpListener, Error> {
    Ok(TcpListener::bind(addr)?)
}
