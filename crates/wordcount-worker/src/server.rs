//! General worker server loop: accept one connection, stream its
//! continuation-framed body through the tokenizer, respond once.

use std::net::TcpListener;

use tracing::{debug, info};
use wordcount_comm::{write_frame, ContinuationReader};
use wordcount_core::{BufferedStreamer, WordCounter};

use crate::error::Error;

const READ_BUFFER_SIZE: usize = 16 * 1024;

/// Runs a single worker iteration: accept, count, respond.
///
/// `format_response` turns the finished word map into the response body —
/// either every word ([`crate::response::format_full`]) or just the
/// worker's local top-K ([`crate::response::format_top_k`]).
pub fn run_once(listener: &TcpListener, format_response: &impl Fn(&wordcount_core::WordMap) -> Vec<u8>) -> Result<(), Error> {
    let (stream, peer) = listener.accept()?;
    stream.set_nodelay(true)?;
    info!(%peer, "accepted connection");

    let mut counter = WordCounter::new();
    let mut streamer = BufferedStreamer::new(READ_BUFFER_SIZE);
    streamer.run(ContinuationReader::new(&stream), &mut counter)?;
    debug!(words = counter.map().len(), "finished counting");

    let body = format_response(counter.map());
    let mut writer = &stream;
    write_frame(&mut writer, &body)?;
    info!(bytes = body.len(), "sent response");
    Ok(())
}
