use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("buffer too small to hold a complete word")]
    BufferTooSmall,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
