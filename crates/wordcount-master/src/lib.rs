//! Fan-out distributors, the per-worker endpoint protocol, and the master
//! orchestration that ties file reading, distribution, and response
//! collection together.

pub mod collector;
pub mod distributor;
pub mod error;
pub mod file_list;
pub mod letter_distributor;
pub mod orchestrate;

pub use error::Error;
pub use orchestrate::{run_stream, Fanout, RunConfig, WorkerSpec};
