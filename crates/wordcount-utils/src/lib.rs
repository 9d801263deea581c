pub mod assert;
pub mod fs;
pub mod logging;
pub mod thread;

pub use fs::regular_files_in;
pub use thread::{thread_boot, ThreadPriority};
