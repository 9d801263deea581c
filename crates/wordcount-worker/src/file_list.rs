//! File-list worker session: the master sends framed file paths instead of
//! raw bytes; the worker opens each one locally and counts it.

use std::fs::File;
use std::net::TcpListener;
use std::path::Path;

use tracing::{debug, info};
use wordcount_comm::{read_frame, write_frame};
use wordcount_core::{BufferedStreamer, WordCounter};

use crate::error::Error;

pub const DONE_SENTINEL: &str = ";]-done";
const READ_BUFFER_SIZE: usize = 16 * 1024;

pub fn run_once(listener: &TcpListener, format_response: &impl Fn(&wordcount_core::WordMap) -> Vec<u8>) -> Result<(), Error> {
    let (stream, peer) = listener.accept()?;
    stream.set_nodelay(true)?;
    info!(%peer, "accepted connection (file-list mode)");

    let mut counter = WordCounter::new();
    let mut reader = &stream;
    loop {
        let body = read_frame(&mut reader)?;
        if body == DONE_SENTINEL.as_bytes() {
            break;
        }
        let path = String::from_utf8_lossy(&body).into_owned();
        debug!(path, "counting assigned file");
        count_file(Path::new(&path), &mut counter)?;
    }

    let body = format_response(counter.map());
    let mut writer = &stream;
    write_frame(&mut writer, &body)?;
    info!(bytes = body.len(), "sent response");
    Ok(())
}

fn count_file(path: &Path, counter: &mut WordCounter) -> Result<(), Error> {
    let file = File::open(path)?;
    let mut streamer = BufferedStreamer::new(READ_BUFFER_SIZE);
    streamer.run(file, counter)?;
    Ok(())
}
