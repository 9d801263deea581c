//! Length-framed wire protocol: an 8-byte right-justified decimal ASCII
//! header followed by that many body bytes. Mirrors the original
//! `sprintf("%8d", len)` framing byte for byte.

use std::io::{Read, Write};

use crate::error::Error;

pub const HEADER_LEN: usize = 8;
pub const MAX_BODY_LEN: usize = 99_999_999;

const CONTINUE_MARKER: u8 = b'.';
const END_MARKER: u8 = b'!';

/// Encodes `len` as an 8-byte space-padded, right-justified decimal string.
///
/// # Panics
/// Panics if `len` exceeds [`MAX_BODY_LEN`]; callers must check first.
#[must_use]
pub fn encode_header(len: usize) -> [u8; HEADER_LEN] {
    assert!(len <= MAX_BODY_LEN, "body length {len} exceeds the frame limit");
    let digits = len.to_string();
    let mut header = [b' '; HEADER_LEN];
    let start = HEADER_LEN - digits.len();
    header[start..].copy_from_slice(digits.as_bytes());
    header
}

/// Parses an 8-byte header produced by [`encode_header`].
pub fn decode_header(bytes: &[u8; HEADER_LEN]) -> Result<usize, Error> {
    let text = std::str::from_utf8(bytes).map_err(|_| Error::Framing(bytes.to_vec()))?;
    let trimmed = text.trim_start();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Framing(bytes.to_vec()));
    }
    trimmed.parse::<usize>().map_err(|_| Error::Framing(bytes.to_vec()))
}

/// Writes one length-framed message: header then body.
pub fn write_frame<W: Write>(w: &mut W, body: &[u8]) -> Result<(), Error> {
    if body.len() > MAX_BODY_LEN {
        return Err(Error::BodyTooLarge(body.len()));
    }
    w.write_all(&encode_header(body.len()))?;
    w.write_all(body)?;
    Ok(())
}

/// Reads one length-framed message, allocating a buffer sized to the body.
pub fn read_frame<R: Read>(r: &mut R) -> Result<Vec<u8>, Error> {
    let mut header = [0u8; HEADER_LEN];
    read_exact_or_truncated(r, &mut header)?;
    let len = decode_header(&header)?;
    let mut body = vec![0u8; len];
    read_exact_or_truncated(r, &mut body)?;
    Ok(body)
}

fn read_exact_or_truncated<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<(), Error> {
    match r.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(Error::Truncated),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Writes a sequence of framed chunks prefixed with a continuation marker:
/// `'.'` before every chunk, `'!'` alone to end the stream. `STREAM :=
/// (MARKER FRAME)* END` — the end marker is a bare terminal byte, nothing
/// follows it. Used for the master's bulk directory-content stream to a
/// worker, where the receiver doesn't know the chunk count up front.
pub struct ContinuationWriter<W> {
    inner: W,
    finished: bool,
}

impl<W: Write> ContinuationWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, finished: false }
    }

    /// Writes one more chunk; the stream is not yet complete.
    pub fn write_chunk(&mut self, body: &[u8]) -> Result<(), Error> {
        debug_assert!(!self.finished, "write_chunk called after finish");
        self.inner.write_all(&[CONTINUE_MARKER])?;
        write_frame(&mut self.inner, body)
    }

    /// Writes the bare end marker and marks the stream done.
    pub fn finish(mut self) -> Result<W, Error> {
        self.inner.write_all(&[END_MARKER])?;
        self.finished = true;
        Ok(self.inner)
    }
}

/// Reads a continuation stream back out as a plain byte stream, so it can
/// be fed directly into [`wordcount_core::BufferedStreamer`].
pub struct ContinuationReader<R> {
    inner: R,
    pending: Vec<u8>,
    pending_pos: usize,
    done: bool,
}

impl<R: Read> ContinuationReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pending: Vec::new(), pending_pos: 0, done: false }
    }
}

impl<R: Read> Read for ContinuationReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        loop {
            if self.pending_pos < self.pending.len() {
                let n = buf.len().min(self.pending.len() - self.pending_pos);
                buf[..n].copy_from_slice(&self.pending[self.pending_pos..self.pending_pos + n]);
                self.pending_pos += n;
                return Ok(n);
            }
            if self.done {
                return Ok(0);
            }

            let mut marker = [0u8; 1];
            read_exact_or_truncated(&mut self.inner, &mut marker)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            match marker[0] {
                CONTINUE_MARKER => {
                    self.pending = read_frame(&mut self.inner)
                        .map_err(|e| std::io::Error::other(e.to_string()))?;
                    self.pending_pos = 0;
                }
                END_MARKER => {
                    self.done = true;
                }
                other => {
                    return Err(std::io::Error::other(format!(
                        "unrecognized continuation marker byte {other:#x}"
                    )));
                }
            }
        }
    }
}
