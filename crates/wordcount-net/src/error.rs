use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Comm(#[from] wordcount_comm::Error),

    #[error("no registered connection for token {0:?}")]
    UnknownToken(mio::Token),
}
