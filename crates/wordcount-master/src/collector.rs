//! Parses a worker's framed response body (`"word\tcount\n"` lines, or just
//! the worker's local top-K lines) back into a [`WordMap`].
//!
//! Reuses [`Tokenizer`] for this: tab and newline aren't word characters,
//! so scanning the body yields an alternating `word, count, word, count...`
//! token stream for free — the same trick the original parser leans on.

use wordcount_core::{Tokenizer, WordMap};

use crate::error::Error;

pub fn parse_response(body: &[u8]) -> Result<WordMap, Error> {
    let mut tokens: Vec<String> = Vec::new();
    let mut tokenizer = Tokenizer::new();
    tokenizer.scan(body, true, |span| tokens.push(String::from_utf8_lossy(span).into_owned()));

    if tokens.len() % 2 != 0 {
        return Err(Error::BadResponse);
    }

    let mut map = WordMap::new();
    let mut pairs = tokens.into_iter();
    while let Some(word) = pairs.next() {
        let count_text = pairs.next().expect("token count is even, checked above");
        let count: u64 = count_text.parse().map_err(|_| Error::BadResponse)?;
        map.add(word, count);
    }
    Ok(map)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_alternating_word_count_lines() {
        let map = parse_response(b"cat\t3\ndog\t1\n").unwrap();
        assert_eq!(map.get("cat"), 3);
        assert_eq!(map.get("dog"), 1);
    }

    #[test]
    fn rejects_an_odd_token_count() {
        assert!(parse_response(b"cat\t3\ndog").is_err());
    }

    #[test]
    fn empty_body_is_an_empty_map() {
        let map = parse_response(b"").unwrap();
        assert!(map.is_empty());
    }
}
