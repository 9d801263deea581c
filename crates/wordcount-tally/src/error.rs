use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("path does not exist: {0}")]
    PathMissing(PathBuf),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] wordcount_core::Error),
}
