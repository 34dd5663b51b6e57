//! Tick-driven heartbeat
//!
//! [`HeartbeatTimer`] is the only state shared between the periodic tick
//! source and the controller loop. The tick source calls
//! [`HeartbeatTimer::on_tick`]; the loop drains the due flag with
//! [`HeartbeatTimer::take_due`].
//!
//! ```text
//! tick:  count % period == 0 ? due = true
//!        count = count + 1 == horizon ? 0 : count + 1
//! loop:  swap(due, false) -> heartbeat_process()
//! ```
//!
//! Only the tick source writes the counter, so plain load/store is enough
//! there. The due flag has two writers and is cleared with an atomic swap,
//! which keeps a tick landing between "observe" and "clear" from being lost.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::TimerConfig;

/// Tick counter and heartbeat-due flag shared with the tick source
#[derive(Debug)]
pub struct HeartbeatTimer {
    tick_count: AtomicU32,
    heartbeat_due: AtomicBool,
    heartbeat_period: u32,
    reset_horizon: u32,
}

impl HeartbeatTimer {
    /// Create a timer context
    ///
    /// Zero periods are clamped to 1; validated configurations never
    /// contain them.
    pub const fn new(config: &TimerConfig) -> Self {
        Self {
            tick_count: AtomicU32::new(0),
            heartbeat_due: AtomicBool::new(false),
            heartbeat_period: max_one(config.heartbeat_period_ticks),
            reset_horizon: max_one(config.reset_horizon_ticks),
        }
    }

    /// Advance one tick (tick source only)
    pub fn on_tick(&self) {
        let count = self.tick_count.load(Ordering::Relaxed);
        if count % self.heartbeat_period == 0 {
            self.heartbeat_due.store(true, Ordering::Release);
        }

        let next = count + 1;
        let next = if next >= self.reset_horizon { 0 } else { next };
        self.tick_count.store(next, Ordering::Relaxed);
    }

    /// Clear the due flag, returning whether it was set
    pub fn take_due(&self) -> bool {
        self.heartbeat_due.swap(false, Ordering::AcqRel)
    }

    /// Returns true if a heartbeat is waiting to be processed
    pub fn is_due(&self) -> bool {
        self.heartbeat_due.load(Ordering::Acquire)
    }

    /// Ticks since the last wrap
    pub fn tick_count(&self) -> u32 {
        self.tick_count.load(Ordering::Relaxed)
    }

    pub fn heartbeat_period(&self) -> u32 {
        self.heartbeat_period
    }

    pub fn reset_horizon(&self) -> u32 {
        self.reset_horizon
    }
}

const fn max_one(value: u32) -> u32 {
    if value == 0 {
        1
    } else {
        value
    }
}
