use thiserror::Error;

/// A queue is full and cannot accept the bytes offered to it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("queue full: {requested} bytes requested, {available} available")]
pub struct QueueFullError {
    pub requested: usize,
    pub available: usize,
}

/// A queue has no bytes available to pop.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("queue empty")]
pub struct EmptyError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed frame header: {0:?}")]
    Framing(Vec<u8>),

    #[error("frame body length {0} exceeds the 99,999,999-byte limit")]
    BodyTooLarge(usize),

    #[error("connection closed mid-frame")]
    Truncated,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] wordcount_core::Error),
}
