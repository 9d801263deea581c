pub mod error;
pub mod run;

pub use error::Error;
pub use run::{count_directory, count_file, count_stdin};
