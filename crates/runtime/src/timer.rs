//! Tokio-backed gravity timer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::trace;

use falling_blocks_core::TickTimer;

use crate::driver::SessionInput;

/// Posts `SessionInput::Gravity` on the driver channel every interval.
///
/// Holds only a weak sender, so a running timer never keeps the driver's
/// channel open on its own.
pub struct TokioTimer {
    runtime: Handle,
    tx: mpsc::WeakUnboundedSender<SessionInput>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new(
        runtime: Handle,
        tx: &mpsc::UnboundedSender<SessionInput>,
        generation: Arc<AtomicU64>,
    ) -> Self {
        Self {
            runtime,
            tx: tx.downgrade(),
            generation,
            task: None,
        }
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl TickTimer for TokioTimer {
    fn start(&mut self, interval: Duration) {
        self.abort_task();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let weak = self.tx.clone();

        self.task = Some(self.runtime.spawn(async move {
            // first tick one full interval from now, not immediately
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(tx) = weak.upgrade() else {
                    break;
                };
                if tx.send(SessionInput::Gravity { generation }).is_err() {
                    break;
                }
            }
            trace!(generation, "gravity task finished");
        }));
    }

    fn stop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_task();
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        self.abort_task();
    }
}
