//! `word_char_divvy`: an alternate fan-out that routes each whole word to a
//! queue chosen from its first character, fixed at construction. Trades
//! load balance for a stable, deterministic key-space partition.

use wordcount_core::classify::to_lower_ascii;
use wordcount_core::stream::BlobProcessor;
use wordcount_core::tokenizer::Tokenizer;
use wordcount_comm::Producer;

const ALPHABET_LEN: usize = 36; // 'a'..='z' then '0'..='9'

fn char_rank(b: u8) -> Option<usize> {
    match b {
        b'a'..=b'z' => Some((b - b'a') as usize),
        b'0'..=b'9' => Some(26 + (b - b'0') as usize),
        _ => None,
    }
}

/// Builds the first-letter → queue-index table for `worker_count` workers.
///
/// # Panics
/// Panics if `worker_count` is 0 or greater than 36 — `word_char_divvy`
/// requires at least one bucket per worker and at most one per character.
#[must_use]
pub fn build_letter_map(worker_count: usize) -> [usize; ALPHABET_LEN] {
    assert!((1..=ALPHABET_LEN).contains(&worker_count), "worker_count must be in 1..=36");
    let mut map = [0usize; ALPHABET_LEN];
    for (rank, slot) in map.iter_mut().enumerate() {
        *slot = rank * worker_count / ALPHABET_LEN;
    }
    map
}

pub struct LetterDistributor<'a> {
    queues: &'a [Producer],
    letter_map: [usize; ALPHABET_LEN],
    tokenizer: Tokenizer,
}

impl<'a> LetterDistributor<'a> {
    #[must_use]
    pub fn new(queues: &'a [Producer]) -> Self {
        let letter_map = build_letter_map(queues.len());
        Self { queues, letter_map, tokenizer: Tokenizer::new() }
    }

}

impl BlobProcessor for LetterDistributor<'_> {
    fn process(&mut self, buf: &[u8], eof: bool) -> usize {
        let queues = self.queues;
        let letter_map = self.letter_map;
        let push_word = |word: &[u8]| {
            if let Some(&first) = word.first() {
                let queue = char_rank(to_lower_ascii(first)).map_or(0, |rank| letter_map[rank]);
                let mut chunk = word;
                while !chunk.is_empty() {
                    let n = queues[queue].push(chunk);
                    if n == 0 {
                        std::thread::yield_now();
                        continue;
                    }
                    chunk = &chunk[n..];
                }
                let mut guard: &[u8] = b" ";
                while !guard.is_empty() {
                    let n = queues[queue].push(guard);
                    if n == 0 {
                        std::thread::yield_now();
                        continue;
                    }
                    guard = &guard[n..];
                }
            }
        };
        self.tokenizer.scan(buf, eof, push_word)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use wordcount_comm::spsc_byte_queue;

    #[test]
    fn builds_a_full_coverage_map_for_small_worker_counts() {
        let map = build_letter_map(3);
        assert!(map.iter().all(|&q| q < 3));
        assert_eq!(map[0], 0); // 'a' always routes to the first worker
    }

    #[test]
    #[should_panic(expected = "worker_count must be in 1..=36")]
    fn rejects_too_many_workers() {
        build_letter_map(37);
    }

    #[test]
    fn same_first_letter_always_routes_to_the_same_queue() {
        let (p0, c0) = spsc_byte_queue(64);
        let (p1, c1) = spsc_byte_queue(64);
        let producers = vec![p0, p1];
        let mut dist = LetterDistributor::new(&producers);
        dist.process(b"apple ant avocado banana!", true);

        let mut out0 = [0u8; 64];
        let mut out1 = [0u8; 64];
        let n0 = c0.pop(&mut out0);
        let n1 = c1.pop(&mut out1);
        let text0 = std::str::from_utf8(&out0[..n0]).unwrap();
        let text1 = std::str::from_utf8(&out1[..n1]).unwrap();
        // every word beginning with the same letter lands in one queue
        assert!(text0.contains("apple") == text0.contains("ant"));
        assert!(text0.contains("apple") == text0.contains("avocado"));
        assert_ne!(text0.is_empty(), text1.is_empty());
    }
}
