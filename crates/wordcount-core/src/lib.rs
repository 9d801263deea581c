//! ASCII word classification, resumable tokenization, buffered streaming,
//! and top-K counting — the single-process core shared by every binary.

pub mod classify;
pub mod error;
pub mod stream;
pub mod tokenizer;
pub mod topk;
pub mod word_map;

pub use error::Error;
pub use stream::{BlobProcessor, BufferedStreamer};
pub use tokenizer::Tokenizer;
pub use topk::{top_k, WordCount};
pub use word_map::{WordCounter, WordMap};
