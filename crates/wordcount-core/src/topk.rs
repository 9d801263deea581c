use crate::word_map::WordMap;

/// A single entry in a top-K result: a word and its count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Selects the `k` highest-count words from a [`WordMap`], preserving ties
/// at the cutoff count rather than truncating arbitrarily among them.
///
/// The result is therefore sorted by descending count (ties broken by word,
/// ascending, for determinism) and has length `>= k` whenever ties straddle
/// the cutoff, `< k` only if the map itself holds fewer than `k` words.
#[must_use]
pub fn top_k(map: &WordMap, k: usize) -> Vec<WordCount> {
    if k == 0 || map.is_empty() {
        return Vec::new();
    }

    let mut entries: Vec<WordCount> =
        map.iter().map(|(word, count)| WordCount { word: word.to_string(), count }).collect();
    entries.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));

    if entries.len() <= k {
        return entries;
    }

    let cutoff = entries[k - 1].count;
    let keep = entries.partition_point(|e| e.count >= cutoff);
    entries.truncate(keep);
    entries
}

#[cfg(test)]
mod test {
    use super::*;

    fn map_from(pairs: &[(&str, u64)]) -> WordMap {
        pairs.iter().map(|&(w, c)| (w.to_string(), c)).collect()
    }

    #[test]
    fn returns_top_k_by_count() {
        let map = map_from(&[("a", 5), ("b", 3), ("c", 1)]);
        let top = top_k(&map, 2);
        assert_eq!(top, vec![
            WordCount { word: "a".into(), count: 5 },
            WordCount { word: "b".into(), count: 3 },
        ]);
    }

    #[test]
    fn preserves_ties_at_cutoff() {
        let map = map_from(&[("a", 5), ("b", 3), ("c", 3), ("d", 1)]);
        let top = top_k(&map, 2);
        // both b and c tie for 2nd place at count 3, so both survive
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].word, "a");
        assert_eq!(top[1].word, "b");
        assert_eq!(top[2].word, "c");
    }

    #[test]
    fn k_larger_than_map_returns_everything() {
        let map = map_from(&[("a", 1), ("b", 2)]);
        assert_eq!(top_k(&map, 10).len(), 2);
    }

    #[test]
    fn k_zero_returns_empty() {
        let map = map_from(&[("a", 1)]);
        assert!(top_k(&map, 0).is_empty());
    }

    #[test]
    fn ties_broken_alphabetically() {
        let map = map_from(&[("zebra", 2), ("apple", 2)]);
        let top = top_k(&map, 1);
        assert_eq!(top[0].word, "apple");
    }
}
