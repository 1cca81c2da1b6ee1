// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Lock-free receive ring for the serial link.
//!
//! Single producer (the USART receive interrupt) and single consumer (the decode loop). Each side
//! owns one index and only ever stores to it, so no lock is needed; the other side reads it with
//! `Acquire` ordering. Slots are `AtomicU8` so that an overrun racing a read is still defined
//! behaviour.
//!
//! On overrun the producer keeps writing and silently overwrites the oldest unread byte. Nothing
//! is reported. The consumer may then see a short or garbled window, which the frame decoder's
//! checksum resync absorbs.

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::config::RX_BUFFER_SIZE;

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_SLOT: AtomicU8 = AtomicU8::new(0);

/// Byte ring with `N` slots. At most `N - 1` bytes are readable at once.
pub struct RxRing<const N: usize = RX_BUFFER_SIZE> {
    slots: [AtomicU8; N],
    /// Next slot to write. Stored only by the producer.
    head: AtomicUsize,
    /// Next slot to read. Stored only by the consumer.
    tail: AtomicUsize,
}

impl<const N: usize> RxRing<N> {
    pub const fn new() -> Self {
        assert!(N > 1, "ring needs at least two slots");
        Self {
            slots: [EMPTY_SLOT; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    // ----- producer side -----

    /// Append one byte. Call from the receive interrupt only.
    #[inline]
    pub fn push(&self, byte: u8) {
        let head = self.head.load(Ordering::Relaxed);
        self.slots[head].store(byte, Ordering::Relaxed);
        // Release publishes the slot write before the new head.
        self.head.store((head + 1) % N, Ordering::Release);
    }

    /// Append a run of bytes, e.g. a simulated frame.
    pub fn push_slice(&self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    // ----- consumer side -----

    /// Number of unread bytes.
    #[inline]
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Relaxed);
        (head + N - tail) % N
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the byte `offset` positions past the read index without consuming it.
    #[inline]
    pub fn peek(&self, offset: usize) -> u8 {
        let tail = self.tail.load(Ordering::Relaxed);
        self.slots[(tail + offset) % N].load(Ordering::Relaxed)
    }

    /// Consume `n` bytes.
    #[inline]
    pub fn advance(&self, n: usize) {
        let tail = self.tail.load(Ordering::Relaxed);
        self.tail.store((tail + n) % N, Ordering::Release);
    }

    /// Pop one byte, if any.
    pub fn pop(&self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let b = self.peek(0);
        self.advance(1);
        Some(b)
    }
}

impl<const N: usize> Default for RxRing<N> {
    fn default() -> Self {
        Self::new()
    }
}
