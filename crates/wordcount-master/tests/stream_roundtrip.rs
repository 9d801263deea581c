//! End-to-end: a master streams real files to real worker processes (in
//! this process, over loopback) and the merged top-K matches ground truth.

use std::fs;
use std::thread;

use tempfile::tempdir;
use wordcount_master::{orchestrate::run_stream, Fanout, RunConfig, WorkerSpec};

fn spawn_worker() -> WorkerSpec {
    let listener = wordcount_net::bind(("127.0.0.1", 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let _ = wordcount_worker::server::run_once(&listener, &wordcount_worker::response::format_full);
    });
    WorkerSpec { host: "127.0.0.1".to_string(), port }
}

fn run_with_fanout(fanout: Fanout) {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "the quick the fox the dog the cat\n".repeat(50)).unwrap();
    fs::write(dir.path().join("b.txt"), "the the the jumps over lazy the\n".repeat(30)).unwrap();

    let workers = vec![spawn_worker(), spawn_worker(), spawn_worker()];

    let map = run_stream(RunConfig { directory: dir.path().to_path_buf(), workers, fanout }).unwrap();

    // "the" appears 4*50 + 4*30 = 320 times across both files.
    assert_eq!(map.get("the"), 320);
    assert_eq!(map.get("fox"), 50);
    assert_eq!(map.get("jumps"), 30);
}

#[test]
fn headroom_fanout_preserves_exact_word_counts() {
    run_with_fanout(Fanout::Headroom);
}

#[test]
fn letter_fanout_preserves_exact_word_counts() {
    run_with_fanout(Fanout::Letter);
}
