//! A bounded, lock-free single-producer/single-consumer byte ring.
//!
//! Unlike the shared-memory queues this is modeled on, the two halves here
//! are only ever used across threads of the same process, so the backing
//! storage is a plain heap allocation behind an `Arc`, not a memory-mapped
//! segment. Push and pop copy as many bytes as currently fit and report how
//! many that was; neither half blocks.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

struct Inner {
    buf: UnsafeCell<Box<[u8]>>,
    // capacity + 1 slots are allocated; one is always left empty so
    // head == tail is unambiguously "empty".
    capacity: usize,
    head: AtomicUsize,
    tail: AtomicUsize,
    // set once the producer has no more bytes to offer, ever
    finished: AtomicBool,
}

unsafe impl Sync for Inner {}

/// Creates a queue that can hold up to `capacity` bytes at once.
#[must_use]
pub fn spsc_byte_queue(capacity: usize) -> (Producer, Consumer) {
    let slots = capacity + 1;
    let inner = Arc::new(Inner {
        buf: UnsafeCell::new(vec![0u8; slots].into_boxed_slice()),
        capacity,
        head: AtomicUsize::new(0),
        tail: AtomicUsize::new(0),
        finished: AtomicBool::new(false),
    });
    (Producer { inner: inner.clone() }, Consumer { inner })
}

impl Inner {
    fn slots(&self) -> usize {
        self.capacity + 1
    }

    fn write_available(&self, head: usize, tail: usize) -> usize {
        (head + self.capacity - tail) % self.slots()
    }

    fn read_available(&self, head: usize, tail: usize) -> usize {
        (tail + self.slots() - head) % self.slots()
    }
}

pub struct Producer {
    inner: Arc<Inner>,
}

impl Producer {
    /// Copies as much of `data` as currently fits, returning that count.
    pub fn push(&self, data: &[u8]) -> usize {
        let head = self.inner.head.load(Ordering::Acquire);
        let tail = self.inner.tail.load(Ordering::Relaxed);
        let available = self.inner.write_available(head, tail);
        let n = data.len().min(available);
        if n == 0 {
            return 0;
        }

        let slots = self.inner.slots();
        // SAFETY: only the producer ever writes through this pointer, and
        // only within [tail, tail+n), which the consumer never reads until
        // `tail` is published below.
        let buf = unsafe { &mut *self.inner.buf.get() };
        let first = n.min(slots - tail);
        buf[tail..tail + first].copy_from_slice(&data[..first]);
        if first < n {
            buf[..n - first].copy_from_slice(&data[first..n]);
        }

        self.inner.tail.store((tail + n) % slots, Ordering::Release);
        n
    }

    /// Bytes that could be pushed right now without blocking.
    #[must_use]
    pub fn write_available(&self) -> usize {
        let head = self.inner.head.load(Ordering::Acquire);
        let tail = self.inner.tail.load(Ordering::Relaxed);
        self.inner.write_available(head, tail)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Declares that no more bytes will ever be pushed. The consumer sees
    /// this once it has drained whatever is still queued.
    pub fn finish(&self) {
        self.inner.finished.store(true, Ordering::Release);
    }
}

pub struct Consumer {
    inner: Arc<Inner>,
}

impl Consumer {
    /// Copies as many queued bytes into `out` as fit, returning that count.
    pub fn pop(&self, out: &mut [u8]) -> usize {
        let tail = self.inner.tail.load(Ordering::Acquire);
        let head = self.inner.head.load(Ordering::Relaxed);
        let available = self.inner.read_available(head, tail);
        let n = out.len().min(available);
        if n == 0 {
            return 0;
        }

        let slots = self.inner.slots();
        // SAFETY: only the consumer ever reads through this pointer, and
        // only within [head, head+n), which the producer never overwrites
        // until `head` is published below.
        let buf = unsafe { &*self.inner.buf.get() };
        let first = n.min(slots - head);
        out[..first].copy_from_slice(&buf[head..head + first]);
        if first < n {
            out[first..n].copy_from_slice(&buf[..n - first]);
        }

        self.inner.head.store((head + n) % slots, Ordering::Release);
        n
    }

    /// Bytes ready to be popped right now.
    #[must_use]
    pub fn read_available(&self) -> usize {
        let tail = self.inner.tail.load(Ordering::Acquire);
        let head = self.inner.head.load(Ordering::Relaxed);
        self.inner.read_available(head, tail)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// True once the producer has called `finish()` and every byte it ever
    /// pushed has been popped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        let done = self.inner.finished.load(Ordering::Acquire);
        done && self.read_available() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    #[test]
    fn push_then_pop_roundtrips() {
        let (p, c) = spsc_byte_queue(16);
        assert_eq!(p.push(b"hello"), 5);
        let mut out = [0u8; 5];
        assert_eq!(c.pop(&mut out), 5);
        assert_eq!(&out, b"hello");
    }

    #[test]
    fn push_clamps_to_available_space() {
        let (p, _c) = spsc_byte_queue(4);
        assert_eq!(p.push(b"hello world"), 4);
        assert_eq!(p.write_available(), 0);
    }

    #[test]
    fn finish_is_observed_only_after_draining() {
        let (p, c) = spsc_byte_queue(16);
        p.push(b"hi");
        p.finish();
        assert!(!c.is_finished());
        let mut out = [0u8; 2];
        c.pop(&mut out);
        assert!(c.is_finished());
    }

    #[test]
    fn pop_clamps_to_queued_bytes() {
        let (p, c) = spsc_byte_queue(16);
        p.push(b"hi");
        let mut out = [0u8; 16];
        assert_eq!(c.pop(&mut out), 2);
        assert_eq!(&out[..2], b"hi");
    }

    #[test]
    fn wraps_around_the_ring() {
        let (p, c) = spsc_byte_queue(4);
        let mut out = [0u8; 4];
        assert_eq!(p.push(b"abcd"), 4);
        assert_eq!(c.pop(&mut out[..2]), 2);
        assert_eq!(&out[..2], b"ab");
        assert_eq!(p.push(b"ef"), 2);
        assert_eq!(c.pop(&mut out), 4);
        assert_eq!(&out, b"cdef");
    }

    #[test]
    fn survives_cross_thread_handoff() {
        let (p, c) = spsc_byte_queue(8);
        let writer = thread::spawn(move || {
            let mut sent = 0;
            while sent < 64 {
                sent += p.push(&[b'x'; 64][sent..]);
            }
        });
        let mut received = 0;
        let mut buf = [0u8; 8];
        while received < 64 {
            received += c.pop(&mut buf);
        }
        writer.join().unwrap();
        assert_eq!(received, 64);
    }
}
