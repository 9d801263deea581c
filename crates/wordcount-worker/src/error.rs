use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] wordcount_core::Error),

    #[error(transparent)]
    Comm(#[from] wordcount_comm::Error),

    #[error(transparent)]
    Net(#[from] wordcount_net::Error),
}
