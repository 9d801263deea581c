//! Single-process counting: stdin, a single file, or a whole directory.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use tracing::info;
use wordcount_core::{BufferedStreamer, WordCounter, WordMap};

use crate::error::Error;

const READ_BUFFER_SIZE: usize = 16 * 1024;

pub fn count_stdin() -> Result<WordMap, Error> {
    let mut counter = WordCounter::new();
    let mut streamer = BufferedStreamer::new(READ_BUFFER_SIZE);
    streamer.run(io::stdin().lock(), &mut counter)?;
    Ok(counter.into_map())
}

pub fn count_file(path: &Path) -> Result<WordMap, Error> {
    if !path.is_file() {
        return Err(Error::PathMissing(path.to_path_buf()));
    }
    let mut counter = WordCounter::new();
    let mut streamer = BufferedStreamer::new(READ_BUFFER_SIZE);
    streamer.run(BufReader::new(File::open(path)?), &mut counter)?;
    Ok(counter.into_map())
}

pub fn count_directory(path: &Path) -> Result<WordMap, Error> {
    if !path.is_dir() {
        return Err(Error::PathMissing(path.to_path_buf()));
    }
    let mut total = WordMap::new();
    for file in wordcount_utils::regular_files_in(path)? {
        info!(path = %file.display(), "reading file");
        total.merge(count_file(&file)?);
    }
    Ok(total)
}
