use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::error;
use wordcount_tally::{run, Error};

/// Reads a file, a directory, or standard input, and prints every word seen
/// followed by the top ten most frequent.
#[derive(Parser, Debug)]
#[command(name = "tally")]
struct Args {
    /// A file or directory; omit to read standard input
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    wordcount_utils::logging::init();
    let args = Args::parse();

    let start = Instant::now();
    let result = match &args.path {
        None => run::count_stdin(),
        Some(path) if path.is_dir() => run::count_directory(path),
        Some(path) => run::count_file(path),
    };

    let code = match result {
        Ok(map) => {
            for (word, count) in map.iter() {
                println!("{word}\t{count}");
            }
            println!("\nTop words:\n");
            for (rank, entry) in wordcount_core::top_k(&map, 10).iter().enumerate() {
                println!("{}. {}\t{}", rank + 1, entry.word, entry.count);
            }
            ExitCode::SUCCESS
        }
        Err(e @ Error::PathMissing(_)) => {
            error!(error = %e, "usage error");
            eprintln!("{e}");
            ExitCode::from(1)
        }
        Err(e @ Error::Core(wordcount_core::Error::BufferTooSmall)) => {
            error!(error = %e, "a word in this input was too large to process");
            eprintln!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "tally run failed");
            eprintln!("{e}");
            ExitCode::from(1)
        }
    };
    eprintln!("elapsed: {:?}", start.elapsed());
    code
}
