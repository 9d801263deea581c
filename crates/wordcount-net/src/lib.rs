//! TCP plumbing: blocking connect/accept helpers plus a non-blocking,
//! mio-driven multiplexer for collecting worker responses.

pub mod connect;
pub mod error;
pub mod poll_driver;

pub use connect::{bind, connect_with_retry};
pub use error::Error;
pub use poll_driver::PollDriver;
