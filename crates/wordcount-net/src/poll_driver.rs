//! Non-blocking multiplexer over several worker connections, collecting one
//! framed response from each. Generalizes `flux-network`'s
//! `mio::Poll`-driven connection loop to a fixed, known-in-advance set of
//! peers rather than an accept loop.

use std::collections::HashMap;
use std::net::TcpStream as StdTcpStream;
use std::time::Duration;

use mio::net::TcpStream;
use mio::{Events, Interest, Poll, Token};
use tracing::{trace, warn};
use wordcount_comm::{AsyncReceiver, PollOutcome};

use crate::error::Error;

struct Connection {
    stream: TcpStream,
    receiver: AsyncReceiver,
    label: usize,
}

/// Polls a fixed set of worker connections until every one of them has
/// produced a complete framed response.
pub struct PollDriver {
    poll: Poll,
    connections: HashMap<Token, Connection>,
}

impl PollDriver {
    /// `connections` pairs each already-connected, already-handshaked
    /// stream with a caller-chosen label (typically a worker index) used
    /// to attribute the eventual response.
    pub fn new(connections: Vec<(usize, StdTcpStream)>) -> Result<Self, Error> {
        let poll = Poll::new()?;
        let mut table = HashMap::with_capacity(connections.len());
        for (i, (label, std_stream)) in connections.into_iter().enumerate() {
            std_stream.set_nonblocking(true)?;
            let mut stream = TcpStream::from_std(std_stream);
            let token = Token(i);
            poll.registry().register(&mut stream, token, Interest::READABLE)?;
            table.insert(token, Connection { stream, receiver: AsyncReceiver::new(), label });
        }
        Ok(Self { poll, connections: table })
    }

    /// Blocks until every registered connection has yielded a complete
    /// response frame, returning `(label, body)` pairs in completion order.
    pub fn collect_all(mut self) -> Result<Vec<(usize, Vec<u8>)>, Error> {
        let mut results = Vec::with_capacity(self.connections.len());
        let mut events = Events::with_capacity(self.connections.len().max(1));

        while !self.connections.is_empty() {
            self.poll.poll(&mut events, Some(Duration::from_secs(30)))?;
            let ready: Vec<Token> = events.iter().map(mio::event::Event::token).collect();

            for token in ready {
                let Some(conn) = self.connections.get_mut(&token) else { continue };
                loop {
                    match conn.receiver.poll_once(&mut conn.stream) {
                        Ok(PollOutcome::Message(body)) => {
                            let label = conn.label;
                            trace!(label, bytes = body.len(), "worker response received");
                            results.push((label, body));
                            let mut conn = self.connections.remove(&token).unwrap();
                            self.poll.registry().deregister(&mut conn.stream)?;
                            break;
                        }
                        Ok(PollOutcome::WouldBlock) => break,
                        Ok(PollOutcome::Eof) => {
                            warn!(label = conn.label, "worker connection closed before a response frame completed");
                            let mut conn = self.connections.remove(&token).unwrap();
                            self.poll.registry().deregister(&mut conn.stream)?;
                            break;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        }

        Ok(results)
    }
}
