use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use tracing::error;
use wordcount_master::{file_list, orchestrate, Error, Fanout as FanoutStrategy, RunConfig, WorkerSpec};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FanoutArg {
    Headroom,
    Letter,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Stream,
    FileList,
}

/// Distributes the word count of every file under `directory` across one
/// or more worker processes, and prints the merged top words.
#[derive(Parser, Debug)]
#[command(name = "master")]
struct Args {
    directory: PathBuf,

    /// `host port` pairs, one per worker, at least one required
    #[arg(required = true, num_args = 2..)]
    endpoints: Vec<String>,

    #[arg(long, value_enum, default_value_t = FanoutArg::Headroom)]
    fanout: FanoutArg,

    #[arg(long, value_enum, default_value_t = ModeArg::Stream)]
    mode: ModeArg,
}

fn parse_workers(endpoints: &[String]) -> Result<Vec<WorkerSpec>, String> {
    if endpoints.len() % 2 != 0 {
        return Err("workers must be given as `host port` pairs".to_string());
    }
    endpoints
        .chunks(2)
        .map(|pair| {
            let port: u16 = pair[1].parse().map_err(|_| format!("invalid port: {}", pair[1]))?;
            Ok(WorkerSpec { host: pair[0].clone(), port })
        })
        .collect()
}

fn main() -> ExitCode {
    wordcount_utils::logging::init();
    let args = Args::parse();

    let workers = match parse_workers(&args.endpoints) {
        Ok(w) => w,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(1);
        }
    };

    let start = Instant::now();
    let result = match args.mode {
        ModeArg::Stream => {
            let fanout = match args.fanout {
                FanoutArg::Headroom => FanoutStrategy::Headroom,
                FanoutArg::Letter => FanoutStrategy::Letter,
            };
            orchestrate::run_stream(RunConfig { directory: args.directory, workers, fanout })
        }
        ModeArg::FileList => file_list::run_file_list(args.directory, workers),
    };

    let code = match result {
        Ok(map) => {
            let top = wordcount_core::top_k(&map, 10);
            for entry in &top {
                println!("{}\t{}", entry.word, entry.count);
            }
            ExitCode::SUCCESS
        }
        Err(e @ Error::DirectoryMissing(_)) => {
            error!(error = %e, "usage error");
            eprintln!("{e}");
            ExitCode::from(1)
        }
        Err(e) => {
            error!(error = %e, "master run failed");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    };
    eprintln!("elapsed: {:?}", start.elapsed());
    code
}
