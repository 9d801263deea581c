use std::io::Read;

use crate::error::Error;

/// Receives a growing byte buffer and reports how much of it it consumed.
///
/// `process` must return `buf.len()` when it consumed everything, or an
/// offset into `buf` marking the start of unconsumed bytes otherwise
/// (`0` means it couldn't make progress at all).
pub trait BlobProcessor {
    fn process(&mut self, buf: &[u8], eof: bool) -> usize;
}

impl<F: FnMut(&[u8], bool) -> usize> BlobProcessor for F {
    fn process(&mut self, buf: &[u8], eof: bool) -> usize {
        self(buf, eof)
    }
}

/// Copies `buf[consumed_to..data_end]` back to the front of `buf` so the
/// next read can append after it, returning the new write offset.
///
/// Shared by [`BufferedStreamer`] and the async receiver in
/// `wordcount-comm`, which both relocate an unconsumed tail the same way.
pub fn relocate_tail(buf: &mut [u8], data_end: usize, consumed_to: usize) -> Result<usize, Error> {
    if consumed_to == data_end {
        Ok(0)
    } else if consumed_to == 0 {
        Err(Error::BufferTooSmall)
    } else {
        buf.copy_within(consumed_to..data_end, 0);
        Ok(data_end - consumed_to)
    }
}

/// Fixed-size buffer loop that feeds a [`BlobProcessor`], relocating any
/// unconsumed tail across reads and signalling EOF on the final, empty read.
pub struct BufferedStreamer {
    buf: Vec<u8>,
}

impl BufferedStreamer {
    #[must_use]
    pub fn new(buffer_size: usize) -> Self {
        Self { buf: vec![0u8; buffer_size] }
    }

    /// Drives `processor` over every byte `source` yields.
    ///
    /// `processor` always sees the full current buffer, not just the
    /// freshly read bytes, so it can pick up a word it refused to emit on
    /// the previous call.
    pub fn run<R: Read>(&mut self, mut source: R, mut processor: impl BlobProcessor) -> Result<(), Error> {
        let mut write_start = 0usize;
        loop {
            let n = source.read(&mut self.buf[write_start..])?;
            let eof = n == 0;
            let data_end = write_start + n;

            let consumed_to = processor.process(&self.buf[..data_end], eof);

            if eof {
                return Ok(());
            }
            write_start = relocate_tail(&mut self.buf, data_end, consumed_to)?;
        }
    }
}
