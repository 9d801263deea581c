//! A blocking single-producer/single-consumer byte queue built on a
//! `Mutex`-guarded ring plus a `Condvar`, instead of [`crate::queue`]'s
//! lock-free ring. Implemented and tested as the documented alternative to
//! the lock-free queue, but the lock-free variant is what the master and
//! worker binaries actually wire up.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};

struct Shared {
    state: Mutex<VecDeque<u8>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
    closed: Mutex<bool>,
}

/// Creates a queue that can hold up to `capacity` bytes at once.
#[must_use]
pub fn blocking_byte_queue(capacity: usize) -> (BlockingProducer, BlockingConsumer) {
    let shared = Arc::new(Shared {
        state: Mutex::new(VecDeque::with_capacity(capacity)),
        not_empty: Condvar::new(),
        not_full: Condvar::new(),
        capacity,
        closed: Mutex::new(false),
    });
    (BlockingProducer { shared: shared.clone() }, BlockingConsumer { shared })
}

pub struct BlockingProducer {
    shared: Arc<Shared>,
}

impl BlockingProducer {
    /// Blocks until at least one byte of `data` can be enqueued, then
    /// copies as much of it as fits without blocking further.
    pub fn push(&self, data: &[u8]) -> usize {
        if data.is_empty() {
            return 0;
        }
        let mut state = self.shared.state.lock().unwrap();
        while state.len() == self.shared.capacity {
            state = self.shared.not_full.wait(state).unwrap();
        }
        let room = self.shared.capacity - state.len();
        let n = data.len().min(room);
        state.extend(&data[..n]);
        drop(state);
        self.shared.not_empty.notify_one();
        n
    }

    /// Marks the queue closed: pending and future `pop` calls drain what
    /// remains, then return `0` instead of blocking forever.
    pub fn close(&self) {
        *self.shared.closed.lock().unwrap() = true;
        self.shared.not_empty.notify_all();
    }
}

pub struct BlockingConsumer {
    shared: Arc<Shared>,
}

impl BlockingConsumer {
    /// Blocks until at least one byte is queued (or the producer closes
    /// with nothing left), then copies as much as fits into `out`.
    pub fn pop(&self, out: &mut [u8]) -> usize {
        if out.is_empty() {
            return 0;
        }
        let mut state = self.shared.state.lock().unwrap();
        while state.is_empty() {
            if *self.shared.closed.lock().unwrap() {
                return 0;
            }
            state = self.shared.not_empty.wait(state).unwrap();
        }
        let n = out.len().min(state.len());
        for slot in out.iter_mut().take(n) {
            *slot = state.pop_front().unwrap();
        }
        drop(state);
        self.shared.not_full.notify_one();
        n
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn push_then_pop_roundtrips() {
        let (p, c) = blocking_byte_queue(16);
        assert_eq!(p.push(b"hello"), 5);
        let mut out = [0u8; 5];
        assert_eq!(c.pop(&mut out), 5);
        assert_eq!(&out, b"hello");
    }

    #[test]
    fn pop_blocks_until_producer_pushes() {
        let (p, c) = blocking_byte_queue(16);
        let reader = thread::spawn(move || {
            let mut out = [0u8; 4];
            let n = c.pop(&mut out);
            (n, out)
        });
        thread::sleep(Duration::from_millis(20));
        p.push(b"ping");
        let (n, out) = reader.join().unwrap();
        assert_eq!(n, 4);
        assert_eq!(&out, b"ping");
    }

    #[test]
    fn close_unblocks_pending_pop_with_zero() {
        let (p, c) = blocking_byte_queue(16);
        let reader = thread::spawn(move || {
            let mut out = [0u8; 4];
            c.pop(&mut out)
        });
        thread::sleep(Duration::from_millis(20));
        p.close();
        assert_eq!(reader.join().unwrap(), 0);
    }

    #[test]
    fn push_blocks_until_room_is_freed() {
        let (p, c) = blocking_byte_queue(2);
        assert_eq!(p.push(b"ab"), 2);
        let writer = thread::spawn(move || p.push(b"cd"));
        thread::sleep(Duration::from_millis(20));
        let mut out = [0u8; 2];
        assert_eq!(c.pop(&mut out), 2);
        assert_eq!(writer.join().unwrap(), 2);
    }
}
