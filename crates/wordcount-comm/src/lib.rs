//! Wire framing, SPSC byte queues, and the non-blocking frame receiver
//! shared by the master and worker binaries.

pub mod error;
pub mod framing;
pub mod queue;
pub mod queue_condvar;
pub mod receiver;

pub use error::Error;
pub use framing::{decode_header, encode_header, read_frame, write_frame, ContinuationReader, ContinuationWriter};
pub use queue::{spsc_byte_queue, Consumer, Producer};
pub use queue_condvar::{blocking_byte_queue, BlockingConsumer, BlockingProducer};
pub use receiver::{AsyncReceiver, PollOutcome};
