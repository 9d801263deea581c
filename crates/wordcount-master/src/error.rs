use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("directory does not exist: {0}")]
    DirectoryMissing(PathBuf),

    #[error("distributor cannot advance despite headroom (eof may be wrong)")]
    LogicError,

    #[error("one or more workers reported an error")]
    WorkerFailed,

    #[error("worker response was not well-formed word/count pairs")]
    BadResponse,

    #[error(transparent)]
    Core(#[from] wordcount_core::Error),

    #[error(transparent)]
    Comm(#[from] wordcount_comm::Error),

    #[error(transparent)]
    Net(#[from] wordcount_net::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
