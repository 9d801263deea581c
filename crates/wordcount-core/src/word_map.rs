use std::collections::HashMap;

/// Mapping from word to count. Insertion order is irrelevant; mutated only
/// by its owning counter.
#[derive(Debug, Default, Clone)]
pub struct WordMap {
    counts: HashMap<String, u64>,
}

impl WordMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, word: &str) -> u64 {
        if let Some(count) = self.counts.get_mut(word) {
            *count += 1;
            return *count;
        }
        self.counts.insert(word.to_string(), 1);
        1
    }

    #[must_use]
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn add(&mut self, word: String, count: u64) {
        *self.counts.entry(word).or_insert(0) += count;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    /// Sums `other`'s counts into `self`, pointwise, consuming `other`.
    pub fn merge(&mut self, other: WordMap) {
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
    }
}

impl FromIterator<(String, u64)> for WordMap {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut map = WordMap::new();
        for (word, count) in iter {
            map.add(word, count);
        }
        map
    }
}

/// Tokenizes raw bytes into a [`WordMap`], one counter per run.
#[derive(Debug, Default)]
pub struct WordCounter {
    tokenizer: crate::tokenizer::Tokenizer,
    map: WordMap,
}

impl WordCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn into_map(self) -> WordMap {
        self.map
    }

    #[must_use]
    pub fn map(&self) -> &WordMap {
        &self.map
    }
}

impl crate::stream::BlobProcessor for WordCounter {
    fn process(&mut self, buf: &[u8], eof: bool) -> usize {
        let map = &mut self.map;
        self.tokenizer.scan(buf, eof, |span| {
            map.increment(&crate::classify::lower_word(span));
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn increment_tracks_counts() {
        let mut m = WordMap::new();
        assert_eq!(m.increment("cat"), 1);
        assert_eq!(m.increment("cat"), 2);
        assert_eq!(m.get("cat"), 2);
        assert_eq!(m.get("dog"), 0);
    }

    #[test]
    fn merge_sums_pointwise() {
        let mut a = WordMap::new();
        a.add("cat".into(), 3);
        let mut b = WordMap::new();
        b.add("cat".into(), 2);
        b.add("dog".into(), 1);
        a.merge(b);
        assert_eq!(a.get("cat"), 5);
        assert_eq!(a.get("dog"), 1);
    }

    #[test]
    fn word_counter_lowercases() {
        let mut counter = WordCounter::new();
        use crate::stream::BlobProcessor;
        counter.process(b"Cat cat CAT", true);
        assert_eq!(counter.map().get("cat"), 3);
    }
}
