//! A non-blocking length-framed message receiver, driven by repeated
//! `poll_once` calls against a socket that may return `WouldBlock`.
//!
//! Used by the master to collect each worker's response frame without a
//! dedicated blocking thread per connection.

use std::io::Read;

use crate::error::Error;
use crate::framing::{decode_header, HEADER_LEN};

#[derive(Debug)]
enum RxState {
    ReadingHeader { buf: [u8; HEADER_LEN], have: usize },
    ReadingBody { body: Vec<u8>, have: usize },
    Finished,
    Errored,
}

/// Outcome of one [`AsyncReceiver::poll_once`] call.
#[derive(Debug)]
pub enum PollOutcome {
    /// A complete frame body was assembled.
    Message(Vec<u8>),
    /// The source has no more bytes ready right now; call again later.
    WouldBlock,
    /// The source closed before a frame boundary.
    Eof,
}

#[derive(Debug)]
pub struct AsyncReceiver {
    state: RxState,
}

impl Default for AsyncReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncReceiver {
    #[must_use]
    pub fn new() -> Self {
        Self { state: RxState::ReadingHeader { buf: [0u8; HEADER_LEN], have: 0 } }
    }

    /// Drives the state machine against `source` until it either completes
    /// a message, hits `WouldBlock`, or observes EOF.
    pub fn poll_once<R: Read>(&mut self, source: &mut R) -> Result<PollOutcome, Error> {
        loop {
            match &mut self.state {
                RxState::ReadingHeader { buf, have } => {
                    match source.read(&mut buf[*have..]) {
                        Ok(0) => {
                            self.state = RxState::Errored;
                            return Ok(PollOutcome::Eof);
                        }
                        Ok(n) => {
                            *have += n;
                            if *have == HEADER_LEN {
                                let len = decode_header(buf)?;
                                self.state =
                                    RxState::ReadingBody { body: vec![0u8; len], have: 0 };
                            }
                        }
                        Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                            return Ok(PollOutcome::WouldBlock);
                        }
                        Err(e) => {
                            self.state = RxState::Errored;
                            return Err(Error::Io(e));
                        }
                    }
                }
                RxState::ReadingBody { body, have } => {
                    if body.is_empty() {
                        let finished = std::mem::replace(&mut self.state, RxState::Finished);
                        let RxState::ReadingBody { body, .. } = finished else { unreachable!() };
                        self.state = RxState::ReadingHeader { buf: [0u8; HEADER_LEN], have: 0 };
                        return Ok(PollOutcome::Message(body));
                    }
                    match source.read(&mut body[*have..]) {
                        Ok(0) => {
                            self.state = RxState::Errored;
                            return Ok(PollOutcome::Eof);
                        }
                        Ok(n) => {
                            *have += n;
                            if *have == body.len() {
                                let finished =
                                    std::mem::replace(&mut self.state, RxState::Finished);
                                let RxState::ReadingBody { body, .. } = finished else {
                                    unreachable!()
                                };
                                self.state =
                                    RxState::ReadingHeader { buf: [0u8; HEADER_LEN], have: 0 };
                                return Ok(PollOutcome::Message(body));
                            }
                        }
                        Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                            return Ok(PollOutcome::WouldBlock);
                        }
                        Err(e) => {
                            self.state = RxState::Errored;
                            return Err(Error::Io(e));
                        }
                    }
                }
                RxState::Finished | RxState::Errored => return Ok(PollOutcome::Eof),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::framing::write_frame;
    use std::io::Cursor;

    #[test]
    fn assembles_a_single_frame() {
        let mut buf = Vec::new();
        write_frame(&mut buf, b"hello").unwrap();
        let mut source = Cursor::new(buf);
        let mut rx = AsyncReceiver::new();
        match rx.poll_once(&mut source).unwrap() {
            PollOutcome::Message(body) => assert_eq!(body, b"hello"),
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn assembles_back_to_back_frames_across_polls() {
        let mut buf = Vec::new();
        write_frame(&mut buf, b"one").unwrap();
        write_frame(&mut buf, b"two").unwrap();
        let mut source = Cursor::new(buf);
        let mut rx = AsyncReceiver::new();

        let first = rx.poll_once(&mut source).unwrap();
        assert!(matches!(first, PollOutcome::Message(ref b) if b == b"one"));
        let second = rx.poll_once(&mut source).unwrap();
        assert!(matches!(second, PollOutcome::Message(ref b) if b == b"two"));
    }

    #[test]
    fn empty_body_frame_completes_immediately() {
        let mut buf = Vec::new();
        write_frame(&mut buf, b"").unwrap();
        let mut source = Cursor::new(buf);
        let mut rx = AsyncReceiver::new();
        match rx.poll_once(&mut source).unwrap() {
            PollOutcome::Message(body) => assert!(body.is_empty()),
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn eof_mid_header_reports_eof() {
        let mut source = Cursor::new(vec![b' ', b' ', b'4']);
        let mut rx = AsyncReceiver::new();
        assert!(matches!(rx.poll_once(&mut source).unwrap(), PollOutcome::Eof));
    }
}
