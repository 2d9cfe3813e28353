//! Game session - the single owner of all mutable game state
//!
//! Every command and every gravity tick enters through [`GameSession::apply`]
//! (or the equivalent named methods), so a tick and a user command can never
//! interleave mid-mutation. Illegal moves are silent no-ops: the call returns
//! `false` and nothing changes.

use tracing::{info, trace};

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::events::SessionEvent;
use crate::gravity::{GravityScheduler, ManualTimer, TickTimer};
use crate::grid::Grid;
use crate::lock::lock_piece;
use crate::piece::Piece;
use crate::rng::{ShapeGenerator, UniformGenerator};
use crate::scoring::calculate_level;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::{GameCommand, Position, Status, BLOCKS_PER_PIECE};

/// Builder for sessions with a custom generator, timer or starting grid
pub struct SessionBuilder {
    config: GameConfig,
    generator: Option<Box<dyn ShapeGenerator + Send>>,
    timer: Option<Box<dyn TickTimer + Send>>,
    grid: Option<Grid>,
}

impl SessionBuilder {
    /// Shape generator (defaults to uniform, seeded from the config)
    pub fn generator(mut self, generator: impl ShapeGenerator + Send + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    /// Gravity timer (defaults to [`ManualTimer`])
    pub fn timer(mut self, timer: impl TickTimer + Send + 'static) -> Self {
        self.timer = Some(Box::new(timer));
        self
    }

    /// Starting grid for the first game; its size overrides the config.
    /// A later new game starts from an empty grid of the same size.
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn build(self) -> Result<GameSession, ConfigError> {
        let mut config = self.config;
        let grid = match self.grid {
            Some(grid) => {
                config.width = grid.width();
                config.height = grid.height();
                grid
            }
            None => Grid::new(config.width, config.height)?,
        };
        config.validate()?;

        let mut generator = self
            .generator
            .unwrap_or_else(|| Box::new(UniformGenerator::seeded(config.seed)));
        let timer = self.timer.unwrap_or_else(|| Box::new(ManualTimer));

        let active = Piece::spawn(generator.next_kind(), config.width);
        let next = Piece::spawn(generator.next_kind(), config.width);

        let mut session = GameSession {
            config,
            grid,
            active: Some(active),
            next,
            generator,
            gravity: GravityScheduler::new(timer),
            score: 0,
            lines: 0,
            level: 0,
            status: Status::Active,
            events: Vec::new(),
        };
        session.begin();
        Ok(session)
    }
}

/// Complete game state
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    active: Option<Piece>,
    next: Piece,
    generator: Box<dyn ShapeGenerator + Send>,
    gravity: GravityScheduler,
    score: u32,
    lines: u32,
    level: u32,
    status: Status,
    /// Buffered change events (drained by observers)
    events: Vec<SessionEvent>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("active", &self.active)
            .field("next", &self.next)
            .field("score", &self.score)
            .field("lines", &self.lines)
            .field("level", &self.level)
            .field("status", &self.status)
            .field("gravity", &self.gravity)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Start a game with a uniform generator seeded from `config` and a
    /// [`ManualTimer`]
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::builder(config).build()
    }

    pub fn builder(config: GameConfig) -> SessionBuilder {
        SessionBuilder {
            config,
            generator: None,
            timer: None,
            grid: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Absolute block positions of the active piece
    pub fn active_cells(&self) -> Option<[Position; BLOCKS_PER_PIECE]> {
        self.active.as_ref().map(Piece::cells)
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Interval gravity ticks should fire at for the current level
    pub fn gravity_interval(&self) -> std::time::Duration {
        self.gravity.interval()
    }

    /// Whether the gravity timer is currently running
    pub fn gravity_running(&self) -> bool {
        self.gravity.is_running()
    }

    /// Events buffered since the last drain
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Take every buffered event, oldest first
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            grid: self.grid.rows().map(<[_]>::to_vec).collect(),
            active: self.active.map(ActiveSnapshot::from),
            next: NextSnapshot::from(self.next),
            score: self.score,
            lines: self.lines,
            level: self.level,
            status: self.status,
            gravity_ms: self.gravity.interval().as_millis() as u64,
        }
    }

    /// Apply a command
    ///
    /// Returns true if the session changed. Movement commands are ignored
    /// unless the game is active; only `NewGame` is honored once it is over.
    pub fn apply(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::NewGame => {
                self.new_game();
                true
            }
            GameCommand::Pause => self.pause(),
            GameCommand::Resume => self.resume(),
            GameCommand::TogglePause => match self.status {
                Status::Active => self.pause(),
                Status::Paused => self.resume(),
                Status::Over => false,
            },
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::MoveDown => self.move_down(),
            GameCommand::Rotate => self.rotate(),
            GameCommand::HardDrop => self.hard_drop(),
        }
    }

    /// Gravity tick: the same downward move manual input uses
    pub fn tick(&mut self) -> bool {
        if self.status != Status::Active {
            trace!(status = self.status.as_str(), "gravity tick ignored");
            return false;
        }
        self.move_down()
    }

    /// Reset grid and counters and draw two fresh pieces
    pub fn new_game(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        let width = self.config.width;
        self.active = Some(Piece::spawn(self.generator.next_kind(), width));
        self.next = Piece::spawn(self.generator.next_kind(), width);
        self.begin();
    }

    pub fn pause(&mut self) -> bool {
        if self.status != Status::Active {
            return false;
        }
        self.status = Status::Paused;
        self.gravity.sync(self.status, self.level);
        self.events.push(SessionEvent::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != Status::Paused {
            return false;
        }
        self.status = Status::Active;
        self.gravity.sync(self.status, self.level);
        self.events.push(SessionEvent::Resumed);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    /// Move down one row, or lock the piece if it cannot fall
    pub fn move_down(&mut self) -> bool {
        if self.status != Status::Active {
            return false;
        }
        if !self.try_shift(0, 1) {
            self.lock_and_advance();
        }
        true
    }

    /// Rotate 90° about the pivot block; no wall kicks
    pub fn rotate(&mut self) -> bool {
        if self.status != Status::Active {
            return false;
        }
        let Some(candidate) = self.active.as_ref().and_then(Piece::rotated) else {
            return false;
        };
        if !self.grid.is_valid_placement(&candidate) {
            trace!(kind = candidate.kind.as_str(), "rotation rejected");
            return false;
        }
        self.active = Some(candidate);
        self.events.push(SessionEvent::Rotated);
        true
    }

    /// Drop as far as the piece goes, then lock it
    pub fn hard_drop(&mut self) -> bool {
        if self.status != Status::Active {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let mut distance = 0;
        while self
            .grid
            .is_valid_placement(&active.translated(0, distance + 1))
        {
            distance += 1;
        }

        if distance > 0 {
            self.active = Some(active.translated(0, distance));
            self.events.push(SessionEvent::Moved { dx: 0, dy: distance });
        }
        self.lock_and_advance();
        true
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        if self.status != Status::Active {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.translated(dx, dy);
        if !self.grid.is_valid_placement(&candidate) {
            trace!(dx, dy, "move rejected");
            return false;
        }
        self.active = Some(candidate);
        self.events.push(SessionEvent::Moved { dx, dy });
        true
    }

    /// Commit the active piece, score any cleared rows and bring in the next
    fn lock_and_advance(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let outcome = lock_piece(&mut self.grid, &piece);
        let rows = outcome.rows_cleared();
        if rows > 0 {
            self.score = self.score.saturating_add(outcome.points);
            self.lines = self.lines.saturating_add(rows);
        }
        self.events.push(SessionEvent::Locked {
            kind: piece.kind,
            written: outcome.written,
            rows_cleared: rows,
            points: outcome.points,
        });

        let level = calculate_level(self.lines);
        if level != self.level {
            self.level = level;
            self.gravity.sync(self.status, level);
            info!(
                level,
                interval_ms = self.gravity.interval().as_millis() as u64,
                "level up"
            );
            self.events.push(SessionEvent::LevelChanged {
                level,
                interval_ms: self.gravity.interval().as_millis() as u64,
            });
        }

        let fresh = Piece::spawn(self.generator.next_kind(), self.config.width);
        let incoming = std::mem::replace(&mut self.next, fresh);
        self.active = Some(incoming);

        if self.grid.is_valid_placement(&incoming) {
            self.events.push(SessionEvent::Spawned {
                kind: incoming.kind,
            });
        } else {
            self.finish();
        }
    }

    /// Enter the active state for a freshly drawn game
    fn begin(&mut self) {
        self.status = Status::Active;
        self.events.push(SessionEvent::NewGame);
        info!(
            width = self.config.width,
            height = self.config.height,
            "new game"
        );

        let spawn_ok = self
            .active
            .as_ref()
            .is_some_and(|piece| self.grid.is_valid_placement(piece));
        if spawn_ok {
            self.gravity.restart(self.level);
        } else {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.status = Status::Over;
        self.gravity.stop();
        self.events.push(SessionEvent::GameOver);
        info!(score = self.score, lines = self.lines, "game over");
    }
}
