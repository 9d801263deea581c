use crate::classify::is_word_byte;

/// Scans byte ranges for maximal runs of ASCII alphanumerics, supporting
/// resumption at a partial trailing word across calls.
///
/// A single `Tokenizer` is meant to be driven repeatedly over successive,
/// physically-relocated buffers (see [`crate::stream::BufferedStreamer`]):
/// each call sees the whole current buffer, including whatever trailing
/// word the previous call refused to emit.
#[derive(Debug, Default)]
pub struct Tokenizer {
    in_word: bool,
    word_start: usize,
}

impl Tokenizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `buf` left to right, calling `on_word` with each complete word
    /// span. Returns the offset of the first unconsumed byte:
    ///
    /// - `buf.len()` if every byte was accounted for (including a trailing
    ///   word that was emitted because `eof` is true), or
    /// - the start of a trailing partial word, if `eof` is false and `buf`
    ///   ends mid-word. The caller must relocate `buf[result..]` to the
    ///   front of the next buffer before calling again.
    pub fn scan(&mut self, buf: &[u8], eof: bool, mut on_word: impl FnMut(&[u8])) -> usize {
        // The caller always relocates any trailing word to offset 0 before
        // the next call, so a carried-over word restarts there.
        if self.in_word {
            self.word_start = 0;
        }

        for (i, &b) in buf.iter().enumerate() {
            let word_char = is_word_byte(b);
            if !self.in_word && word_char {
                self.word_start = i;
                self.in_word = true;
            } else if self.in_word && !word_char {
                on_word(&buf[self.word_start..i]);
                self.in_word = false;
            }
        }

        if self.in_word {
            if eof {
                on_word(&buf[self.word_start..buf.len()]);
                self.in_word = false;
                buf.len()
            } else {
                self.word_start
            }
        } else {
            buf.len()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn collect(buf: &[u8], eof: bool) -> (Vec<String>, usize) {
        let mut words = Vec::new();
        let mut t = Tokenizer::new();
        let last = t.scan(buf, eof, |w| words.push(String::from_utf8_lossy(w).into_owned()));
        (words, last)
    }

    #[test]
    fn emits_maximal_word_runs() {
        let (words, last) = collect(b"a taco taco taco taco taco!", true);
        assert_eq!(words, vec!["a", "taco", "taco", "taco", "taco", "taco"]);
        assert_eq!(last, 27);
    }

    #[test]
    fn trailing_word_not_emitted_without_eof() {
        let (words, last) = collect(b"hello", false);
        assert!(words.is_empty());
        assert_eq!(last, 0);
    }

    #[test]
    fn trailing_word_emitted_with_eof() {
        let (words, last) = collect(b"hello", true);
        assert_eq!(words, vec!["hello"]);
        assert_eq!(last, 5);
    }

    #[test]
    fn resumes_across_two_scans() {
        let mut t = Tokenizer::new();
        let mut words = Vec::new();
        let last = t.scan(b"a burr", false, |w| words.push(w.to_vec()));
        assert_eq!(last, 2); // "burr" not yet emitted, starts at index 2
        assert_eq!(words, vec![b"a".to_vec()]);

        // caller relocates buf[2..] ("burr") to offset 0, then appends "ito!"
        let last2 = t.scan(b"burrito!", true, |w| words.push(w.to_vec()));
        assert_eq!(last2, 8);
        assert_eq!(words, vec![b"a".to_vec(), b"burrito".to_vec()]);
    }

    #[test]
    fn no_word_characters_returns_end() {
        let (words, last) = collect(b"   !!!   ", true);
        assert!(words.is_empty());
        assert_eq!(last, 9);
    }
}
