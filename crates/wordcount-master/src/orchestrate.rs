//! Master orchestration: spawns the reader thread and one sender thread
//! per worker, waits for both sides, merges the results, and hands back the
//! combined [`WordMap`].

use std::fs::File;
use std::net::TcpStream;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};
use wordcount_comm::{read_frame, spsc_byte_queue, Consumer, ContinuationWriter, Producer};
use wordcount_core::{BufferedStreamer, WordMap};
use wordcount_utils::{thread_boot, ThreadPriority};

use crate::collector::parse_response;
use crate::distributor::HeadroomDistributor;
use crate::error::Error;
use crate::letter_distributor::LetterDistributor;

/// Default SPSC queue capacity, matching the glossary's "typically 10 KiB".
pub const QUEUE_CAPACITY: usize = 10 * 1024;
const READ_BUFFER_SIZE: usize = 16 * 1024;
const SENDER_CHUNK: usize = 4 * 1024;
const CONNECT_ATTEMPTS: u32 = 20;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug)]
pub enum Fanout {
    Headroom,
    Letter,
}

#[derive(Clone, Debug)]
pub struct WorkerSpec {
    pub host: String,
    pub port: u16,
}

pub struct RunConfig {
    pub directory: PathBuf,
    pub workers: Vec<WorkerSpec>,
    pub fanout: Fanout,
}

/// Runs the streaming master: reads every regular file under `directory`,
/// fans its bytes out to the workers, and merges their responses.
pub fn run_stream(config: RunConfig) -> Result<WordMap, Error> {
    if !config.directory.is_dir() {
        return Err(Error::DirectoryMissing(config.directory));
    }

    let mut producers = Vec::with_capacity(config.workers.len());
    let mut consumers = Vec::with_capacity(config.workers.len());
    for _ in &config.workers {
        let (p, c) = spsc_byte_queue(QUEUE_CAPACITY);
        producers.push(p);
        consumers.push(c);
    }

    let sender_handles: Vec<JoinHandle<Result<WordMap, Error>>> = config
        .workers
        .iter()
        .cloned()
        .zip(consumers)
        .enumerate()
        .map(|(label, (spec, consumer))| thread::spawn(move || sender_thread(label, spec, consumer)))
        .collect();

    let directory = config.directory.clone();
    let fanout = config.fanout;
    let reader_handle: JoinHandle<Result<(), Error>> =
        thread::spawn(move || reader_thread(directory, fanout, producers));

    reader_handle.join().map_err(|_| Error::WorkerFailed)??;

    let mut merged = WordMap::new();
    let mut any_failed = false;
    for (label, handle) in sender_handles.into_iter().enumerate() {
        match handle.join().map_err(|_| Error::WorkerFailed) {
            Ok(Ok(map)) => merged.merge(map),
            Ok(Err(e)) => {
                warn!(label, error = %e, "worker sender failed");
                any_failed = true;
            }
            Err(e) => {
                warn!(label, error = %e, "worker sender thread panicked");
                any_failed = true;
            }
        }
    }

    if any_failed {
        return Err(Error::WorkerFailed);
    }
    Ok(merged)
}

fn reader_thread(directory: PathBuf, fanout: Fanout, producers: Vec<Producer>) -> Result<(), Error> {
    thread_boot(None, ThreadPriority::OSDefault);
    let files = wordcount_utils::regular_files_in(&directory)?;
    info!(count = files.len(), ?directory, "enumerated input files");

    for path in files {
        debug!(?path, "reading file");
        let file = File::open(&path)?;
        let mut streamer = BufferedStreamer::new(READ_BUFFER_SIZE);
        match fanout {
            Fanout::Headroom => {
                let mut dist = HeadroomDistributor::new(&producers);
                streamer.run(file, &mut dist)?;
                if let Some(e) = dist.take_error() {
                    return Err(e);
                }
            }
            Fanout::Letter => {
                let mut dist = LetterDistributor::new(&producers);
                streamer.run(file, &mut dist)?;
            }
        }
    }

    for p in &producers {
        p.finish();
    }
    Ok(())
}

fn sender_thread(label: usize, spec: WorkerSpec, consumer: Consumer) -> Result<WordMap, Error> {
    thread_boot(None, ThreadPriority::OSDefault);
    debug!(label, host = %spec.host, port = spec.port, "connecting to worker");
    let stream = wordcount_net::connect_with_retry((spec.host.as_str(), spec.port), CONNECT_ATTEMPTS, CONNECT_RETRY_DELAY)?;

    stream_queue_to_worker(&stream, &consumer)?;

    let mut reader = &stream;
    let body = read_frame(&mut reader)?;
    debug!(label, bytes = body.len(), "received worker response");
    Ok(parse_response(&body)?)
}

fn stream_queue_to_worker(stream: &TcpStream, consumer: &Consumer) -> Result<(), Error> {
    let mut writer = ContinuationWriter::new(stream);
    let mut buf = vec![0u8; SENDER_CHUNK];
    loop {
        let n = consumer.pop(&mut buf);
        if n > 0 {
            writer.write_chunk(&buf[..n])?;
        } else if consumer.is_finished() {
            break;
        } else {
            thread::yield_now();
        }
    }
    writer.finish()?;
    Ok(())
}
