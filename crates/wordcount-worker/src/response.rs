//! The two response shapes a worker can send back: every word it saw, or
//! just its own local top-K.

use std::fmt::Write as _;

use wordcount_core::{top_k, WordMap};

/// `"word\tcount\n"` for every word the worker counted.
#[must_use]
pub fn format_full(map: &WordMap) -> Vec<u8> {
    let mut out = String::new();
    for (word, count) in map.iter() {
        let _ = writeln!(out, "{word}\t{count}");
    }
    out.into_bytes()
}

/// `"word\tcount\n"` for only the worker's local top `k` words.
#[must_use]
pub fn format_top_k(map: &WordMap, k: usize) -> Vec<u8> {
    let mut out = String::new();
    for entry in top_k(map, k) {
        let _ = writeln!(out, "{}\t{}", entry.word, entry.count);
    }
    out.into_bytes()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_response_includes_every_word() {
        let mut map = WordMap::new();
        map.add("cat".into(), 3);
        map.add("dog".into(), 1);
        let body = String::from_utf8(format_full(&map)).unwrap();
        assert!(body.contains("cat\t3\n"));
        assert!(body.contains("dog\t1\n"));
    }

    #[test]
    fn top_k_response_trims_to_k() {
        let mut map = WordMap::new();
        map.add("cat".into(), 3);
        map.add("dog".into(), 2);
        map.add("rat".into(), 1);
        let body = String::from_utf8(format_top_k(&map, 2)).unwrap();
        assert!(body.contains("cat\t3"));
        assert!(body.contains("dog\t2"));
        assert!(!body.contains("rat"));
    }
}
