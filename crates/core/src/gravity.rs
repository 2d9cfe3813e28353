//! Gravity module - the periodic "move down" driver
//!
//! The engine never touches a platform timer. It talks to a [`TickTimer`]
//! that the host supplies, and the host turns each timer tick back into a
//! call to [`GameSession::tick`](crate::session::GameSession::tick).
//!
//! [`GravityScheduler`] keeps the timer in step with the session: running
//! at `gravity_interval(level)` while the game is active, stopped otherwise,
//! and restarted whenever the level changes or a new game begins.

use std::fmt;
use std::time::Duration;

use tracing::trace;

use crate::scoring::gravity_interval;
use crate::types::Status;

/// A cancelable periodic timer
pub trait TickTimer {
    /// Start firing every `interval`, replacing any running schedule
    fn start(&mut self, interval: Duration);

    /// Stop firing; a no-op when already stopped
    fn stop(&mut self);
}

/// Timer for hosts that call `tick()` themselves
///
/// Does nothing; the scheduler still tracks the interval the host should use.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTimer;

impl TickTimer for ManualTimer {
    fn start(&mut self, _interval: Duration) {}

    fn stop(&mut self) {}
}

/// Keeps a [`TickTimer`] in step with session status and level
pub struct GravityScheduler {
    timer: Box<dyn TickTimer + Send>,
    interval: Duration,
    running: bool,
}

impl fmt::Debug for GravityScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GravityScheduler")
            .field("interval", &self.interval)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl GravityScheduler {
    pub fn new(timer: Box<dyn TickTimer + Send>) -> Self {
        Self {
            timer,
            interval: gravity_interval(0),
            running: false,
        }
    }

    /// Interval the timer is (or would be) running at
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Unconditionally restart at the interval for `level`
    pub fn restart(&mut self, level: u32) {
        self.interval = gravity_interval(level);
        self.running = true;
        trace!(interval_ms = self.interval.as_millis() as u64, "gravity restarted");
        self.timer.start(self.interval);
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            trace!("gravity stopped");
            self.timer.stop();
        }
    }

    /// Bring the timer in line with `status` and `level`
    ///
    /// Restarts when active and either stopped or at a stale interval;
    /// stops when not active. Returns true if the interval changed.
    pub fn sync(&mut self, status: Status, level: u32) -> bool {
        let wanted = gravity_interval(level);
        let changed = wanted != self.interval;
        match status {
            Status::Active if changed || !self.running => self.restart(level),
            Status::Active => {}
            Status::Paused | Status::Over => {
                self.interval = wanted;
                self.stop();
            }
        }
        changed
    }
}
