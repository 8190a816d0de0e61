//! Cancellable delayed delivery of the latest value in a burst.
//!
//! Trailing edge (default): every `push` replaces the pending value and moves
//! the deadline to `delay` after that push; `ready()` yields the value once the
//! deadline passes. Leading edge: a push in a quiet period is returned for
//! immediate use and opens a window; pushes inside the window extend it, and
//! the last of them is delivered by `ready()` once the window closes.
use std::future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep_until, Instant, Sleep};

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    leading_edge: bool,
    timer: Option<Pin<Box<Sleep>>>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration, leading_edge: bool) -> Self { Self { delay, leading_edge, timer: None, pending: None } }

    /// Reschedule with `value`. Returns the value only when it should fire now
    /// (leading edge, first push of a burst).
    pub fn push(&mut self, value: T) -> Option<T> {
        let now = Instant::now();
        let window_open = self.timer.as_ref().is_some_and(|timer| timer.deadline() > now);
        let deadline = now + self.delay;
        match self.timer.as_mut() {
            Some(timer) => timer.as_mut().reset(deadline),
            None => self.timer = Some(Box::pin(sleep_until(deadline))),
        }
        if self.leading_edge && !window_open {
            self.pending = None;
            return Some(value);
        }
        self.pending = Some(value);
        None
    }

    /// Resolves with the pending value once its deadline passes; never resolves when nothing is pending.
    ///
    /// Cancel-safe: dropping the future keeps the pending value and deadline.
    pub async fn ready(&mut self) -> T {
        if self.pending.is_none() {
            return future::pending().await;
        }
        if let Some(timer) = self.timer.as_mut() {
            timer.as_mut().await;
        }
        self.timer = None;
        match self.pending.take() {
            Some(value) => value,
            None => future::pending().await,
        }
    }

    /// Take the pending value now, skipping the rest of the delay.
    pub fn flush(&mut self) -> Option<T> {
        self.timer = None;
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.timer = None;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool { self.pending.is_some() }
}
