//! Pending-vector queue between interrupt context and the main loop.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌───────────────────┐
//! │ TIMER0_COMP  │────▶│                  │     │                   │
//! │ TIMER0_OVF   │────▶│  pending vectors │────▶│ service_pending() │
//! │ (raise)      │     │   (lock-free)    │     │  → timer0 dispatch│
//! └──────────────┘     └──────────────────┘     └───────────────────┘
//! ```
//!
//! Vector handlers only record that the vector fired; the main path drains
//! the queue and runs the Timer0 callback for each entry, in FIFO order.
//! Single producer, single consumer.

use core::sync::atomic::{AtomicU8, Ordering};

use log::warn;

use crate::timer0::{self, Vector};

/// Maximum number of pending vectors.
/// Power of 2 for efficient ring buffer modulo.
const QUEUE_CAP: usize = 16;

static HEAD: AtomicU8 = AtomicU8::new(0);
static TAIL: AtomicU8 = AtomicU8::new(0);
static SLOTS: [AtomicU8; QUEUE_CAP] = [const { AtomicU8::new(0) }; QUEUE_CAP];

/// Record that `vector` fired.  Safe to call from interrupt context.
/// Returns `false` if the queue is full (vector dropped).
pub fn raise(vector: Vector) -> bool {
    let head = HEAD.load(Ordering::Relaxed);
    let tail = TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % QUEUE_CAP as u8;

    if next_head == tail {
        warn!("interrupts: queue full, dropped {vector:?}");
        return false;
    }

    SLOTS[head as usize].store(vector as u8, Ordering::Relaxed);
    HEAD.store(next_head, Ordering::Release);
    true
}

/// Take the oldest pending vector.
pub fn pop() -> Option<Vector> {
    let tail = TAIL.load(Ordering::Relaxed);
    let head = HEAD.load(Ordering::Acquire);

    if tail == head {
        return None;
    }

    let raw = SLOTS[tail as usize].load(Ordering::Relaxed);
    TAIL.store((tail + 1) % QUEUE_CAP as u8, Ordering::Release);
    Vector::from_u8(raw)
}

/// Drain the queue, dispatching each vector to the Timer0 callback.
/// Returns the number of vectors serviced.
pub fn service_pending() -> usize {
    let mut serviced = 0;
    while let Some(vector) = pop() {
        timer0::dispatch(vector);
        serviced += 1;
    }
    serviced
}

pub fn pending_len() -> usize {
    let head = HEAD.load(Ordering::Relaxed) as usize;
    let tail = TAIL.load(Ordering::Relaxed) as usize;
    (head + QUEUE_CAP - tail) % QUEUE_CAP
}

/// Discard everything pending.
pub fn clear() {
    TAIL.store(HEAD.load(Ordering::Acquire), Ordering::Release);
}
