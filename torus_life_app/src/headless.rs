// headless.rs - Terminal driver: step on a fixed cadence, print every frame

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::{self, MissedTickBehavior};
use torus_life::{Command, Session};
use tracing::info;

/// Runs `session` until `generations` have been printed, the session pauses
/// itself (cycle detection) or Ctrl-C arrives. Returns the final generation.
pub async fn run<W: Write>(
    mut session: Session,
    generations: Option<u64>,
    out: &mut W,
) -> Result<u64> {
    let period = session.delay().max(Duration::from_millis(1));
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    print_frame(&session, out)?;
    session.apply(Command::Start)?;
    info!(?period, ?generations, "headless run started");

    while !session.should_exit() {
        if generations.is_some_and(|limit| session.generation() >= limit) {
            session.apply(Command::Exit)?;
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {
                if session.tick() {
                    print_frame(&session, out)?;
                }
                if !session.is_running() {
                    info!(generation = session.generation(), "session paused itself");
                    session.apply(Command::Exit)?;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                info!(generation = session.generation(), "interrupted");
                session.apply(Command::Exit)?;
            }
        }
    }

    Ok(session.generation())
}

fn print_frame<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let grid = session.grid();
    writeln!(
        out,
        "generation {} - {} alive",
        session.generation(),
        grid.population()
    )?;
    write!(out, "{grid}")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
