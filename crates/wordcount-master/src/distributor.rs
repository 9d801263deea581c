//! Fan-out distributor: a [`BlobProcessor`] that routes each chunk of a
//! file's bytes to whichever per-worker queue currently has the most free
//! space, always cutting on a word boundary.

use wordcount_core::classify::is_word_byte;
use wordcount_core::stream::BlobProcessor;
use wordcount_comm::Producer;
use wordcount_utils::wc_assert;

use crate::error::Error;

const GUARD_BYTE: u8 = b'#';

/// True if cutting `buf` at `at` would land inside a word: the byte just
/// before the cut is a word char, and either the buffer ends there with
/// more data still to come (`!eof`), or the byte right after the cut is
/// also a word char.
fn splits_word(buf: &[u8], at: usize, eof: bool) -> bool {
    at > 0
        && is_word_byte(buf[at - 1])
        && if at == buf.len() { !eof } else { is_word_byte(buf[at]) }
}

/// Routes bytes to the queue with maximum `write_available`, clamping
/// every cut to a word boundary and injecting a guard byte where a cut
/// would otherwise let two chunks fuse into a spurious word.
pub struct HeadroomDistributor<'a> {
    queues: &'a [Producer],
    error: Option<Error>,
}

impl<'a> HeadroomDistributor<'a> {
    #[must_use]
    pub fn new(queues: &'a [Producer]) -> Self {
        Self { queues, error: None }
    }

    /// Takes the fatal error recorded during processing, if any.
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    fn push_all(&self, queue: usize, mut chunk: &[u8]) {
        while !chunk.is_empty() {
            let n = self.queues[queue].push(chunk);
            if n == 0 {
                std::thread::yield_now();
                continue;
            }
            chunk = &chunk[n..];
        }
    }

    fn most_available(&self) -> (usize, usize) {
        loop {
            let (idx, avail) = self
                .queues
                .iter()
                .map(Producer::write_available)
                .enumerate()
                .max_by_key(|&(_, a)| a)
                .expect("at least one worker queue is configured");
            if avail > 0 {
                return (idx, avail);
            }
            std::thread::yield_now();
        }
    }
}

impl BlobProcessor for HeadroomDistributor<'_> {
    fn process(&mut self, buf: &[u8], eof: bool) -> usize {
        let mut proc_start = 0usize;

        loop {
            while proc_start < buf.len() && !is_word_byte(buf[proc_start]) {
                proc_start += 1;
            }
            if proc_start == buf.len() {
                return buf.len();
            }

            let (queue, available) = self.most_available();
            let remaining = buf.len() - proc_start;

            let mut proc_end = if eof && available >= remaining {
                buf.len()
            } else {
                (proc_start + available).min(buf.len())
            };
            while proc_end > proc_start && splits_word(buf, proc_end, eof) {
                proc_end -= 1;
            }

            if proc_end == proc_start {
                if available >= remaining {
                    self.error = Some(Error::LogicError);
                    return buf.len();
                }
                // this queue couldn't fit even one safely-cut byte; try again,
                // hoping a queue's headroom has grown by the next pass
                continue;
            }

            wc_assert!(proc_end > proc_start && proc_end <= buf.len(), "distributor cut {proc_start}..{proc_end} out of range for buffer of len {}", buf.len());
            self.push_all(queue, &buf[proc_start..proc_end]);
            if is_word_byte(buf[proc_end - 1]) {
                self.push_all(queue, &[GUARD_BYTE]);
            }

            proc_start = proc_end;
            if proc_start == buf.len() {
                return buf.len();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use wordcount_comm::spsc_byte_queue;

    fn drain(consumer: &wordcount_comm::Consumer) -> Vec<u8> {
        let mut out = Vec::new();
        let mut buf = [0u8; 256];
        loop {
            let n = consumer.pop(&mut buf);
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        out
    }

    #[test]
    fn routes_whole_words_without_splitting() {
        let (p0, c0) = spsc_byte_queue(3);
        let (p1, c1) = spsc_byte_queue(16);
        let (p2, c2) = spsc_byte_queue(16);
        let producers = vec![p0, p1, p2];
        let mut dist = HeadroomDistributor::new(&producers);
        dist.process(b"Hi there you!", true);
        assert!(dist.take_error().is_none());

        let all: Vec<u8> =
            [drain(&c0), drain(&c1), drain(&c2)].concat().into_iter().filter(|&b| b != b'#').collect();
        let mut words: Vec<&str> =
            std::str::from_utf8(&all).unwrap().split(|c: char| !c.is_ascii_alphanumeric()).filter(|s| !s.is_empty()).collect();
        words.sort_unstable();
        assert_eq!(words, vec!["hi", "there", "you"]);
    }

    #[test]
    fn full_headroom_with_no_boundary_in_sight_is_a_logic_error() {
        // the entire visible buffer is one word with !eof and the queue
        // could take all of it, so there is no safe boundary to cut at
        let (p0, _c0) = spsc_byte_queue(16);
        let producers = vec![p0];
        let mut dist = HeadroomDistributor::new(&producers);
        dist.process(b"partial", false);
        assert!(matches!(dist.take_error(), Some(Error::LogicError)));
    }

    #[test]
    fn picks_the_queue_with_more_room_over_a_tight_one() {
        let (p0, c0) = spsc_byte_queue(2);
        let (p1, c1) = spsc_byte_queue(16);
        let producers = vec![p0, p1];
        let mut dist = HeadroomDistributor::new(&producers);
        let consumed = dist.process(b"partial!", true);
        assert_eq!(consumed, 8);
        assert!(dist.take_error().is_none());
        assert!(drain(&c0).is_empty());
        assert_eq!(drain(&c1), b"partial!");
    }
}
