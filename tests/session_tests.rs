//! Session tests - command surface, scoring, levels and the state machine

use std::sync::{Arc, Mutex};
use std::time::Duration;

use falling_blocks::core::{
    GameConfig, GameSession, Grid, SequenceGenerator, SessionEvent, TickTimer,
};
use falling_blocks::types::{Cell, GameCommand, Position, ShapeKind, Status, Tag};

const X: Cell = Cell::Occupied(Tag(9));

/// Timer that records the intervals it was started with
#[derive(Clone, Default)]
struct SpyTimer {
    starts: Arc<Mutex<Vec<Duration>>>,
    stops: Arc<Mutex<usize>>,
}

impl TickTimer for SpyTimer {
    fn start(&mut self, interval: Duration) {
        self.starts.lock().unwrap().push(interval);
    }

    fn stop(&mut self) {
        *self.stops.lock().unwrap() += 1;
    }
}

fn session_on(grid: Grid, kind: ShapeKind) -> GameSession {
    GameSession::builder(GameConfig::default())
        .generator(SequenceGenerator::repeat(kind))
        .grid(grid)
        .build()
        .unwrap()
}

#[test]
fn test_o_drop_clears_bottom_row() {
    let mut grid = Grid::new(10, 20).unwrap();
    for x in 0..8 {
        grid.set(x, 19, X);
    }
    grid.set(0, 18, X);
    let mut session = session_on(grid, ShapeKind::O);

    for _ in 0..4 {
        assert!(session.apply(GameCommand::MoveRight));
    }
    assert!(session.apply(GameCommand::HardDrop));

    assert_eq!(session.score(), 100);
    assert_eq!(session.lines_cleared(), 1);
    assert_eq!(session.level(), 0);

    // row 18 (the stray block plus the O's top half) is now row 19
    let tag = Tag::for_kind(ShapeKind::O);
    assert_eq!(session.grid().get(0, 19), Some(X));
    assert_eq!(session.grid().get(8, 19), Some(Cell::Occupied(tag)));
    assert_eq!(session.grid().get(9, 19), Some(Cell::Occupied(tag)));
    assert_eq!(session.grid().occupied().count(), 3);
    assert!(session.grid().row(18).unwrap().iter().all(Cell::is_empty));
}

#[test]
fn test_no_clear_leaves_score_alone() {
    let mut session = session_on(Grid::new(10, 20).unwrap(), ShapeKind::T);
    session.apply(GameCommand::HardDrop);

    assert_eq!(session.grid().occupied().count(), 4);
    assert_eq!(session.score(), 0);
    assert_eq!(session.lines_cleared(), 0);
}

#[test]
fn test_ten_lines_raise_level_and_speed_up_gravity() {
    let timer = SpyTimer::default();
    let starts = timer.starts.clone();
    // a horizontal I fills a 4-wide row exactly
    let mut session = GameSession::builder(GameConfig::new(4, 20))
        .generator(SequenceGenerator::repeat(ShapeKind::I))
        .timer(timer)
        .build()
        .unwrap();
    session.drain_events();

    for _ in 0..9 {
        session.apply(GameCommand::HardDrop);
    }
    assert_eq!(session.level(), 0);
    assert_eq!(session.gravity_interval(), Duration::from_millis(1000));

    session.apply(GameCommand::HardDrop);

    assert_eq!(session.lines_cleared(), 10);
    assert_eq!(session.score(), 1000);
    assert_eq!(session.level(), 1);
    assert_eq!(session.gravity_interval(), Duration::from_millis(900));
    assert_eq!(
        *starts.lock().unwrap(),
        vec![Duration::from_millis(1000), Duration::from_millis(900)]
    );

    let events = session.drain_events();
    assert!(events.contains(&SessionEvent::LevelChanged {
        level: 1,
        interval_ms: 900
    }));
}

#[test]
fn test_gravity_floor_at_high_levels() {
    let mut session = GameSession::builder(GameConfig::new(4, 20))
        .generator(SequenceGenerator::repeat(ShapeKind::I))
        .build()
        .unwrap();

    for _ in 0..120 {
        session.apply(GameCommand::HardDrop);
    }
    assert_eq!(session.level(), 12);
    assert_eq!(session.gravity_interval(), Duration::from_millis(100));
    assert_eq!(session.status(), Status::Active);
}

#[test]
fn test_stack_to_top_ends_game() {
    let timer = SpyTimer::default();
    let stops = timer.stops.clone();
    let mut session = GameSession::builder(GameConfig::default())
        .generator(SequenceGenerator::repeat(ShapeKind::O))
        .timer(timer)
        .build()
        .unwrap();

    // ten O pieces stack rows 0..=19 in columns 4 and 5
    for _ in 0..10 {
        session.apply(GameCommand::HardDrop);
    }

    assert_eq!(session.status(), Status::Over);
    assert!(!session.gravity_running());
    assert_eq!(*stops.lock().unwrap(), 1);
    assert_eq!(session.events().last(), Some(&SessionEvent::GameOver));
}

#[test]
fn test_over_ignores_everything_but_new_game() {
    let mut grid = Grid::new(10, 20).unwrap();
    grid.set(5, 0, X);
    let mut session = session_on(grid, ShapeKind::O);
    assert_eq!(session.status(), Status::Over);

    let before = session.snapshot();
    for command in [
        GameCommand::MoveLeft,
        GameCommand::MoveRight,
        GameCommand::MoveDown,
        GameCommand::Rotate,
        GameCommand::HardDrop,
        GameCommand::Pause,
        GameCommand::Resume,
        GameCommand::TogglePause,
    ] {
        assert!(!session.apply(command), "{:?} applied after game over", command);
    }
    assert!(!session.tick());
    assert_eq!(session.snapshot(), before);

    assert!(session.apply(GameCommand::NewGame));
    assert_eq!(session.status(), Status::Active);
    assert_eq!(session.grid().occupied().count(), 0);
}

#[test]
fn test_new_game_keeps_dimensions() {
    let mut session = GameSession::new(GameConfig::new(12, 23)).unwrap();
    session.apply(GameCommand::HardDrop);
    session.apply(GameCommand::NewGame);

    assert_eq!(session.grid().width(), 12);
    assert_eq!(session.grid().height(), 23);
    assert_eq!(session.active().unwrap().origin, Position::new(5, 0));
}

#[test]
fn test_rejected_moves_emit_no_events() {
    let mut session = session_on(Grid::new(10, 20).unwrap(), ShapeKind::O);
    session.drain_events();

    assert!(!session.apply(GameCommand::Rotate));
    for _ in 0..4 {
        session.apply(GameCommand::MoveLeft);
    }
    session.drain_events();
    assert!(!session.apply(GameCommand::MoveLeft));

    assert!(session.events().is_empty());
}

#[test]
fn test_tick_matches_move_down() {
    let mut ticked = session_on(Grid::new(10, 20).unwrap(), ShapeKind::S);
    let mut moved = session_on(Grid::new(10, 20).unwrap(), ShapeKind::S);

    for _ in 0..25 {
        ticked.tick();
        moved.apply(GameCommand::MoveDown);
    }
    assert_eq!(ticked.snapshot(), moved.snapshot());
}

#[test]
fn test_seeded_sessions_replay_identically() {
    let script = [
        GameCommand::MoveLeft,
        GameCommand::Rotate,
        GameCommand::HardDrop,
        GameCommand::MoveRight,
        GameCommand::MoveRight,
        GameCommand::HardDrop,
        GameCommand::Rotate,
        GameCommand::HardDrop,
    ];
    let play = |seed| {
        let mut session = GameSession::new(GameConfig::default().with_seed(seed)).unwrap();
        for command in script {
            session.apply(command);
        }
        session.snapshot()
    };

    assert_eq!(play(7), play(7));
}
