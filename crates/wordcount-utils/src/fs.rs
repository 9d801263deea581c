//! Recursive regular-file enumeration, the `recursive_directory_iterator`
//! + `is_regular_file` filter from the original directory reader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Collects every regular file under `root`, recursing into subdirectories.
/// Symlinks are followed via `metadata`; anything that isn't a regular file
/// (directories, sockets, devices) is skipped.
pub fn regular_files_in(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                stack.push(path);
            } else if path.metadata().is_ok_and(|m| m.is_file()) {
                out.push(path);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::{create_dir, File};

    #[test]
    fn finds_nested_regular_files() {
        let tmp = tempfile::tempdir().unwrap();
        File::create(tmp.path().join("a.txt")).unwrap();
        create_dir(tmp.path().join("sub")).unwrap();
        File::create(tmp.path().join("sub/b.txt")).unwrap();

        let mut files = regular_files_in(tmp.path()).unwrap();
        files.sort();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.txt") || files[0].ends_with("sub/b.txt"));
    }
}
