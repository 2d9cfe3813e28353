//! Replay runner (default binary).
//!
//! Reads a whitespace-separated command script from stdin, plays it against a
//! seeded session and prints the final snapshot as JSON on stdout. Logs go to
//! stderr so the output stays machine-readable.
//!
//! ```text
//! $ echo "left left rotate drop  # first piece" | blocks-replay
//! ```

use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use falling_blocks::core::{GameConfig, GameSession};
use falling_blocks::types::{GameCommand, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// One script step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Command(GameCommand),
    /// Gravity tick, driven by hand since the replay has no clock
    Tick,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config_from_env()?;

    let mut script = String::new();
    io::stdin()
        .read_to_string(&mut script)
        .context("failed to read command script from stdin")?;
    let steps = parse_script(&script)?;

    let snapshot = replay(config, &steps)?;
    let json = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
    println!("{json}");
    Ok(())
}

/// Session configuration from `BLOCKS_WIDTH`, `BLOCKS_HEIGHT` and `BLOCKS_SEED`
fn config_from_env() -> Result<GameConfig> {
    use std::env;

    let width = env::var("BLOCKS_WIDTH")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_WIDTH);
    let height = env::var("BLOCKS_HEIGHT")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_HEIGHT);
    let seed = env::var("BLOCKS_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(GameConfig::default().seed);

    let config = GameConfig::new(width, height).with_seed(seed);
    config.validate().context("invalid BLOCKS_* configuration")?;
    Ok(config)
}

fn parse_script(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (number, line) in script.lines().enumerate() {
        let code = line.split('#').next().unwrap_or_default();
        for token in code.split_whitespace() {
            let step = if token.eq_ignore_ascii_case("tick") {
                Step::Tick
            } else {
                match GameCommand::from_str(token) {
                    Some(command) => Step::Command(command),
                    None => bail!("line {}: unknown command `{}`", number + 1, token),
                }
            };
            steps.push(step);
        }
    }
    Ok(steps)
}

fn replay(config: GameConfig, steps: &[Step]) -> Result<falling_blocks::core::GameSnapshot> {
    let mut session = GameSession::new(config).context("failed to start session")?;
    for event in session.drain_events() {
        debug!(?event, "event");
    }

    for step in steps {
        let changed = match *step {
            Step::Command(command) => session.apply(command),
            Step::Tick => session.tick(),
        };
        if !changed {
            debug!(?step, "step had no effect");
        }
        for event in session.drain_events() {
            debug!(?event, "event");
        }
    }

    info!(
        score = session.score(),
        lines = session.lines_cleared(),
        level = session.level(),
        status = session.status().as_str(),
        "replay finished"
    );
    Ok(session.snapshot())
}
