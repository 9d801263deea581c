use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::error;
use wordcount_worker::{file_list, response, server};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Stream,
    FileList,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ResponseArg {
    Full,
    TopK,
}

/// Listens on `port` and counts the words of whatever the master sends,
/// forever, one job at a time.
#[derive(Parser, Debug)]
#[command(name = "worker")]
struct Args {
    port: u16,

    #[arg(long, value_enum, default_value_t = ModeArg::Stream)]
    mode: ModeArg,

    #[arg(long, value_enum, default_value_t = ResponseArg::Full)]
    response: ResponseArg,

    /// Only meaningful with `--response top-k`
    #[arg(long, default_value_t = 10)]
    k: usize,
}

fn main() -> ExitCode {
    wordcount_utils::logging::init();
    let args = Args::parse();

    let k = args.k;
    let format_response = move |map: &wordcount_core::WordMap| match args.response {
        ResponseArg::Full => response::format_full(map),
        ResponseArg::TopK => response::format_top_k(map, k),
    };

    let listener = match wordcount_net::bind(("0.0.0.0", args.port)) {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "failed to bind");
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };

    loop {
        let outcome = match args.mode {
            ModeArg::Stream => server::run_once(&listener, &format_response),
            ModeArg::FileList => file_list::run_once(&listener, &format_response),
        };
        if let Err(e) = outcome {
            error!(error = %e, "worker iteration failed");
        }
    }
}
