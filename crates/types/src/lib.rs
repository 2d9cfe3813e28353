//! Shared data types for the falling-block engine
//!
//! This crate defines the plain values passed between the engine core, the
//! runtime driver and whatever presentation layer sits on top. Everything here
//! is pure data: no grid logic, no timers, no randomness.
//!
//! # Coordinates
//!
//! Grid positions are `(x, y)` with `x` growing to the right and `y` growing
//! downwards. Row 0 is the top row. Pieces may hang above the grid (`y < 0`)
//! while they spawn, so coordinates are signed.
//!
//! # Grid Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 10 | Standard playfield width |
//! | `DEFAULT_HEIGHT` | 20 | Standard playfield height |
//! | `TALL_GRID_HEIGHT` | 23 | Taller variant used by some front-ends |
//! | `MAX_DIMENSION` | 1024 | Upper bound accepted for either dimension |
//!
//! # Gravity Timing
//!
//! Gravity starts at `BASE_GRAVITY_MS` per row and speeds up by
//! `GRAVITY_STEP_MS` per level, never dropping below `MIN_GRAVITY_MS`.
//!
//! # Examples
//!
//! ```
//! use falling_blocks_types::{Cell, GameCommand, ShapeKind, Tag};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//!
//! let cell = Cell::Occupied(Tag::for_kind(kind));
//! assert!(cell.is_occupied());
//!
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//! ```

use serde::{Deserialize, Serialize};

/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 10;

/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 20;

/// Height of the taller 23-row playfield variant
pub const TALL_GRID_HEIGHT: usize = 23;

/// Largest width or height a grid may be constructed with
pub const MAX_DIMENSION: usize = 1024;

/// Gravity interval at level 0 (one row per second)
pub const BASE_GRAVITY_MS: u64 = 1000;

/// Gravity speed-up per level
pub const GRAVITY_STEP_MS: u64 = 100;

/// Fastest gravity interval, reached at level 9
pub const MIN_GRAVITY_MS: u64 = 100;

/// Points awarded for every cleared row
pub const POINTS_PER_LINE: u32 = 100;

/// Rows that must be cleared to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Number of blocks in every piece
pub const BLOCKS_PER_PIECE: usize = 4;

/// The seven piece kinds
///
/// - **I**: straight line of four
/// - **J**: three in a row with a hook down on the right
/// - **L**: three in a row with a hook down on the left
/// - **O**: 2x2 square, never rotates
/// - **S**: zig-zag rising to the right
/// - **T**: three in a row with a stem below the middle
/// - **Z**: zig-zag falling to the right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// Every kind, in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::T => "t",
            ShapeKind::Z => "z",
        }
    }

    /// Position of this kind in [`ShapeKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::J => 1,
            ShapeKind::L => 2,
            ShapeKind::O => 3,
            ShapeKind::S => 4,
            ShapeKind::T => 5,
            ShapeKind::Z => 6,
        }
    }
}

/// Opaque color identifier marking which shape produced a cell
///
/// The engine never interprets a tag; it only copies it from the piece into
/// the grid when the piece locks. Presentation layers map tags to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub u8);

impl Tag {
    /// Canonical tag for a shape kind (one distinct tag per kind)
    pub fn for_kind(kind: ShapeKind) -> Self {
        Tag(kind.index() as u8)
    }
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "tag")]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Tag),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    /// Tag of an occupied cell
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(tag) => Some(*tag),
        }
    }
}

/// Absolute grid position (`y` may be negative above the top row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Lifecycle state of a game session
///
/// - **Active**: accepting commands and gravity ticks
/// - **Paused**: gravity suspended; only resume and new game are honored
/// - **Over**: terminal; only new game is honored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Paused,
    Over,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Paused => "paused",
            Status::Over => "over",
        }
    }
}

/// Commands accepted by a game session
///
/// Human input, replay scripts and the gravity timer all funnel through
/// these. `MoveDown` is the same command gravity issues on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameCommand {
    /// Reset the grid and scores, draw two fresh pieces
    NewGame,
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Drop the active piece one row, locking it if it cannot fall
    MoveDown,
    /// Rotate the active piece 90° about its pivot block
    Rotate,
    /// Drop the active piece as far as it goes and lock it
    HardDrop,
    /// Suspend an active game
    Pause,
    /// Continue a paused game
    Resume,
    /// Pause when active, resume when paused
    TogglePause,
}

impl GameCommand {
    /// Parse command from string (case-insensitive)
    ///
    /// Accepts the camelCase names produced by [`GameCommand::as_str`] and the
    /// short replay-script tokens (`left`, `right`, `down`, `drop`, `new`, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("drop"), Some(GameCommand::HardDrop));
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "newgame" | "new" => Some(GameCommand::NewGame),
            "moveleft" | "left" => Some(GameCommand::MoveLeft),
            "moveright" | "right" => Some(GameCommand::MoveRight),
            "movedown" | "down" => Some(GameCommand::MoveDown),
            "rotate" => Some(GameCommand::Rotate),
            "harddrop" | "drop" => Some(GameCommand::HardDrop),
            "pause" => Some(GameCommand::Pause),
            "resume" => Some(GameCommand::Resume),
            "togglepause" | "toggle" => Some(GameCommand::TogglePause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::NewGame => "newGame",
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::MoveDown => "moveDown",
            GameCommand::Rotate => "rotate",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::Pause => "pause",
            GameCommand::Resume => "resume",
            GameCommand::TogglePause => "togglePause",
        }
    }
}
