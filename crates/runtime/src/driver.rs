//! Session driver - one task, one session, one input queue.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, trace};

use falling_blocks_core::{ConfigError, GameSession, GameSnapshot, SessionBuilder, SessionEvent};
use falling_blocks_types::GameCommand;

use crate::timer::TokioTimer;

/// Capacity of the event broadcast; slow subscribers lag rather than block.
const EVENT_CAPACITY: usize = 256;

/// Input delivered to the driver loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    Command(GameCommand),
    /// Gravity tick scheduled under timer `generation`
    Gravity { generation: u64 },
    Shutdown,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("invalid session configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("session driver must be created inside a tokio runtime")]
    NoRuntime(#[from] TryCurrentError),
}

/// Owns the session and applies inputs strictly in arrival order.
pub struct SessionDriver {
    session: GameSession,
    rx: mpsc::UnboundedReceiver<SessionInput>,
    generation: Arc<AtomicU64>,
    snapshots: watch::Sender<GameSnapshot>,
    events: broadcast::Sender<SessionEvent>,
}

/// Cloneable front door to a running driver.
#[derive(Clone)]
pub struct DriverHandle {
    tx: mpsc::UnboundedSender<SessionInput>,
    snapshots: watch::Receiver<GameSnapshot>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionDriver {
    /// Build the session with a [`TokioTimer`] wired to this driver.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn new(builder: SessionBuilder) -> Result<(Self, DriverHandle), DriverError> {
        let runtime = Handle::try_current()?;
        let (tx, rx) = mpsc::unbounded_channel();
        let generation = Arc::new(AtomicU64::new(0));
        let timer = TokioTimer::new(runtime, &tx, generation.clone());

        let mut session = builder.timer(timer).build()?;
        // construction events predate any subscriber
        session.drain_events();

        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let driver = Self {
            session,
            rx,
            generation,
            snapshots: snapshot_tx,
            events: event_tx.clone(),
        };
        let handle = DriverHandle {
            tx,
            snapshots: snapshot_rx,
            events: event_tx,
        };
        Ok((driver, handle))
    }

    /// Process inputs until shutdown or until every handle is dropped.
    ///
    /// Returns the session so callers can inspect the final state.
    pub async fn run(mut self) -> GameSession {
        while let Some(input) = self.rx.recv().await {
            if input == SessionInput::Shutdown {
                debug!("session driver shutting down");
                break;
            }
            self.handle(input);
        }
        self.session
    }

    /// Apply one input and publish whatever it changed.
    fn handle(&mut self, input: SessionInput) -> bool {
        let changed = match input {
            SessionInput::Command(command) => {
                trace!(command = command.as_str(), "command");
                self.session.apply(command)
            }
            SessionInput::Gravity { generation } => {
                if generation != self.generation.load(Ordering::SeqCst) {
                    trace!(generation, "stale gravity tick dropped");
                    false
                } else {
                    self.session.tick()
                }
            }
            SessionInput::Shutdown => false,
        };

        let events = self.session.drain_events();
        if changed || !events.is_empty() {
            self.snapshots.send_replace(self.session.snapshot());
        }
        for event in events {
            // no subscribers is fine
            let _ = self.events.send(event);
        }
        changed
    }
}

impl DriverHandle {
    /// Queue a command. Returns false if the driver has stopped.
    pub fn send(&self, command: GameCommand) -> bool {
        self.tx.send(SessionInput::Command(command)).is_ok()
    }

    /// Ask the driver loop to exit after the inputs already queued.
    pub fn shutdown(&self) {
        let _ = self.tx.send(SessionInput::Shutdown);
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that wakes on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Receiver for change events published after this call.
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
