//! The simpler file-list back end: the master round-robins file paths to
//! workers as framed messages, terminated by a sentinel, and each worker
//! opens its assigned files locally instead of receiving their bytes.

use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};
use wordcount_comm::{read_frame, write_frame};
use wordcount_core::WordMap;
use wordcount_utils::{thread_boot, ThreadPriority};

use crate::collector::parse_response;
use crate::error::Error;
use crate::orchestrate::WorkerSpec;

/// Body sent in place of a file path to tell a worker its assignment is done.
pub const DONE_SENTINEL: &str = ";]-done";

const CONNECT_ATTEMPTS: u32 = 20;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(200);

pub fn run_file_list(directory: PathBuf, workers: Vec<WorkerSpec>) -> Result<WordMap, Error> {
    if !directory.is_dir() {
        return Err(Error::DirectoryMissing(directory));
    }
    let files = wordcount_utils::regular_files_in(&directory)?;
    info!(count = files.len(), ?directory, "enumerated input files for file-list mode");

    let worker_count = workers.len().max(1);
    let mut assignments: Vec<Vec<PathBuf>> = vec![Vec::new(); worker_count];
    for (i, path) in files.into_iter().enumerate() {
        assignments[i % worker_count].push(path);
    }

    let handles: Vec<JoinHandle<Result<WordMap, Error>>> = workers
        .into_iter()
        .zip(assignments)
        .enumerate()
        .map(|(label, (spec, paths))| thread::spawn(move || worker_session(label, spec, paths)))
        .collect();

    let mut merged = WordMap::new();
    let mut any_failed = false;
    for (label, handle) in handles.into_iter().enumerate() {
        match handle.join().map_err(|_| Error::WorkerFailed) {
            Ok(Ok(map)) => merged.merge(map),
            Ok(Err(e)) => {
                warn!(label, error = %e, "worker session failed");
                any_failed = true;
            }
            Err(e) => {
                warn!(label, error = %e, "worker session thread panicked");
                any_failed = true;
            }
        }
    }

    if any_failed {
        return Err(Error::WorkerFailed);
    }
    Ok(merged)
}

fn worker_session(label: usize, spec: WorkerSpec, paths: Vec<PathBuf>) -> Result<WordMap, Error> {
    thread_boot(None, ThreadPriority::OSDefault);
    debug!(label, host = %spec.host, port = spec.port, file_count = paths.len(), "dispatching file list");
    let stream = wordcount_net::connect_with_retry((spec.host.as_str(), spec.port), CONNECT_ATTEMPTS, CONNECT_RETRY_DELAY)?;

    let mut writer = &stream;
    for path in &paths {
        write_frame(&mut writer, path.to_string_lossy().as_bytes())?;
    }
    write_frame(&mut writer, DONE_SENTINEL.as_bytes())?;

    let mut reader = &stream;
    let body = read_frame(&mut reader)?;
    debug!(label, bytes = body.len(), "received worker response");
    Ok(parse_response(&body)?)
}
