//! Search budgets for move-choosing engines.
//!
//! A search runs for a fixed number of iterations. A wall-clock cap can be
//! layered on top; when it fires the engine returns the best move found so far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// How long an engine may think about one move.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Iteration budget (playouts for Monte-Carlo engines).
    pub iterations: u32,
    /// Optional wall-clock cap for the whole move.
    pub move_time: Option<Duration>,
    /// Shared stop signal, cloned into every search worker.
    pub time_control: TimeControl,
}

impl SearchLimits {
    pub fn iterations(iterations: u32) -> Self {
        Self {
            iterations,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    pub fn iterations_and_time(iterations: u32, move_time: Duration) -> Self {
        Self {
            iterations,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Only the clock limits the search.
    pub fn time(move_time: Duration) -> Self {
        Self::iterations_and_time(u32::MAX, move_time)
    }

    pub fn start(&self) {
        self.time_control.start();
    }

    /// Whether the search must stop before running iteration number `done`.
    #[inline]
    pub fn exhausted(&self, done: u32) -> bool {
        if done >= self.iterations {
            return true;
        }
        if self.time_control.should_check_time(done) {
            return self.time_control.check_time();
        }
        self.time_control.is_stopped()
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::iterations(1000)
    }
}

/// Stop flag plus an optional deadline, shared between search workers.
///
/// Clones share state: stopping one stops all of them.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    started: Arc<OnceLock<Instant>>,
    time_limit: Option<Duration>,
    /// Iterations between clock reads.
    check_interval: u32,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            started: Arc::new(OnceLock::new()),
            time_limit,
            check_interval: 64,
        }
    }

    /// Start the clock. Later calls keep the first start time.
    pub fn start(&self) {
        let _ = self.started.set(Instant::now());
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Read the clock and raise the stop flag once the limit has passed.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(limit) = self.time_limit
            && self.elapsed() >= limit
        {
            self.stop();
            return true;
        }
        false
    }

    #[inline]
    pub fn should_check_time(&self, iterations: u32) -> bool {
        iterations % self.check_interval == 0
    }

    /// Time since [`TimeControl::start`], zero if never started.
    pub fn elapsed(&self) -> Duration {
        self.started.get().map_or(Duration::ZERO, Instant::elapsed)
    }

    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
