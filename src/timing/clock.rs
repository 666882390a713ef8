// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Clock and wait abstractions.
//!
//! Recording reads time through [`Clock`] and playback suspends through
//! [`Waiter`], so both can run against [`VirtualClock`] in tests without
//! real delays.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Source of monotonic time in milliseconds.
///
/// Only differences between readings are meaningful; the epoch is arbitrary.
pub trait Clock {
    /// Milliseconds elapsed since the clock's epoch
    fn now_ms(&self) -> u64;
}

/// Blocking wait used between notes during playback
pub trait Waiter {
    /// Suspend the caller for `duration`
    fn wait(&mut self, duration: Duration);
}

/// Monotonic system clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is now
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

/// Waiter that sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadWaiter;

impl Waiter for ThreadWaiter {
    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Manually driven clock.
///
/// Clones share the same time, so a test can keep a handle while a
/// session or engine owns another. Waiting on it advances time instantly
/// and logs the requested durations.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Arc<AtomicU64>,
    waits: Arc<Mutex<Vec<Duration>>>,
}

impl VirtualClock {
    /// Create a virtual clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a virtual clock at `ms`
    pub fn starting_at(ms: u64) -> Self {
        let clock = Self::new();
        clock.set(ms);
        clock
    }

    /// Move time forward
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to an absolute time
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    /// Durations passed to `wait`, in order
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// Forget logged waits
    pub fn clear_waits(&self) {
        if let Ok(mut waits) = self.waits.lock() {
            waits.clear();
        }
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl Waiter for VirtualClock {
    fn wait(&mut self, duration: Duration) {
        if let Ok(mut waits) = self.waits.lock() {
            waits.push(duration);
        }
        self.advance(duration.as_millis() as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        thread::sleep(Duration::from_millis(5));
        let b = clock.now_ms();
        assert!(b >= a + 5);
    }

    #[test]
    fn test_thread_waiter_blocks() {
        let mut waiter = ThreadWaiter;
        let start = Instant::now();
        waiter.wait(Duration::from_millis(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_virtual_clock_shared() {
        let clock = VirtualClock::starting_at(1_000);
        let handle = clock.clone();

        handle.advance(250);
        assert_eq!(clock.now_ms(), 1_250);

        handle.set(42);
        assert_eq!(clock.now_ms(), 42);
    }

    #[test]
    fn test_virtual_wait_advances() {
        let mut clock = VirtualClock::new();
        clock.wait(Duration::from_millis(500));
        clock.wait(Duration::from_millis(700));

        assert_eq!(clock.now_ms(), 1_200);
        assert_eq!(
            clock.waits(),
            vec![Duration::from_millis(500), Duration::from_millis(700)]
        );

        clock.clear_waits();
        assert!(clock.waits().is_empty());
    }
}
