// session.rs - Playback state owned by whichever driver runs the simulation

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::config::LifeConfig;
use crate::error::GridError;
use crate::grid::LifeGrid;
use crate::patterns::Pattern;

/// How many recent generations are remembered for cycle detection.
const HISTORY_LEN: usize = 10;

/// Everything a control surface can ask of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Randomize,
    Clear,
    /// Advance exactly one generation, running or not.
    Next,
    Start,
    Stop,
    Exit,
    Toggle { row: usize, col: usize },
    Stamp(&'static Pattern),
}

/// A grid together with the running/exit flags and generation bookkeeping.
pub struct Session {
    grid: LifeGrid,
    rng: SmallRng,
    density: f64,
    delay: Duration,
    running: bool,
    exit: bool,
    generation: u64,
    history: VecDeque<u64>,
    cycle_detected: bool,
    stop_on_cycle: bool,
}

impl Session {
    pub fn new(config: &LifeConfig) -> Result<Self, GridError> {
        config.validate()?;
        let grid = LifeGrid::new(config.size)?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        info!(size = config.size, seed = ?config.seed, "created session");

        let mut session = Self {
            grid,
            rng,
            density: config.density,
            delay: config.delay,
            running: false,
            exit: false,
            generation: 0,
            history: VecDeque::with_capacity(HISTORY_LEN),
            cycle_detected: false,
            stop_on_cycle: config.stop_on_cycle,
        };
        session.forget_history();
        Ok(session)
    }

    pub fn apply(&mut self, command: Command) -> Result<(), GridError> {
        debug!(?command, "applying command");
        match command {
            Command::Randomize => {
                self.grid.randomize_with(&mut self.rng, self.density)?;
                self.restart();
            }
            Command::Clear => {
                self.grid.clear();
                self.restart();
            }
            Command::Next => self.advance(),
            Command::Start => {
                if !self.exit {
                    self.running = true;
                }
            }
            Command::Stop => self.running = false,
            Command::Exit => {
                self.running = false;
                self.exit = true;
            }
            Command::Toggle { row, col } => {
                self.grid.toggle(row, col)?;
                self.forget_history();
            }
            Command::Stamp(pattern) => {
                pattern.apply(&mut self.grid)?;
                self.restart();
            }
        }
        Ok(())
    }

    /// One beat of the driver loop: steps if running. Returns whether a
    /// generation was computed.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.exit {
            return false;
        }
        self.advance();
        true
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// Generations computed since the last Randomize, Clear or Stamp.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the current generation repeats one of the last few.
    pub fn cycle_detected(&self) -> bool {
        self.cycle_detected
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    fn advance(&mut self) {
        self.grid.step();
        self.generation += 1;

        let hash = hash_grid(&self.grid);
        if self.history.contains(&hash) {
            if !self.cycle_detected {
                info!(generation = self.generation, "generation repeats a recent one");
            }
            self.cycle_detected = true;
            if self.stop_on_cycle {
                self.running = false;
            }
        }
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(hash);
    }

    fn restart(&mut self) {
        self.generation = 0;
        self.forget_history();
    }

    /// Drops remembered generations and seeds the history with the grid as
    /// it stands now, so a still life is caught on its first step.
    fn forget_history(&mut self) {
        self.history.clear();
        self.history.push_back(hash_grid(&self.grid));
        self.cycle_detected = false;
    }
}

fn hash_grid(grid: &LifeGrid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: usize) -> Session {
        let config = LifeConfig {
            size,
            seed: Some(7),
            ..LifeConfig::default()
        };
        Session::new(&config).unwrap()
    }

    #[test]
    fn tick_only_steps_while_running() {
        let mut s = session(6);
        s.apply(Command::Toggle { row: 1, col: 1 }).unwrap();
        assert!(!s.tick());
        assert_eq!(s.generation(), 0);

        s.apply(Command::Start).unwrap();
        assert!(s.tick());
        assert_eq!(s.generation(), 1);
        assert_eq!(s.grid().population(), 0);

        s.apply(Command::Stop).unwrap();
        assert!(!s.tick());
        assert_eq!(s.generation(), 1);
    }

    #[test]
    fn next_steps_while_stopped() {
        let mut s = session(5);
        s.apply(Command::Stamp(Pattern::find("Blinker").unwrap())).unwrap();
        s.apply(Command::Next).unwrap();
        assert!(!s.is_running());
        assert_eq!(s.generation(), 1);
        let live: Vec<_> = s.grid().live_cells().collect();
        assert_eq!(live, vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn exit_stops_and_blocks_restart() {
        let mut s = session(4);
        s.apply(Command::Start).unwrap();
        s.apply(Command::Exit).unwrap();
        assert!(s.should_exit());
        assert!(!s.is_running());
        s.apply(Command::Start).unwrap();
        assert!(!s.tick());
    }

    #[test]
    fn failed_toggle_changes_nothing() {
        let mut s = session(4);
        let err = s.apply(Command::Toggle { row: 0, col: 4 });
        assert_eq!(err, Err(GridError::OutOfBounds { row: 0, col: 4, size: 4 }));
        assert_eq!(s.grid().population(), 0);
    }

    #[test]
    fn clear_resets_generation() {
        let mut s = session(8);
        s.apply(Command::Randomize).unwrap();
        s.apply(Command::Next).unwrap();
        s.apply(Command::Next).unwrap();
        assert_eq!(s.generation(), 2);
        s.apply(Command::Clear).unwrap();
        assert_eq!(s.generation(), 0);
        assert_eq!(s.grid().population(), 0);
    }

    #[test]
    fn blinker_cycle_detected() {
        let mut s = session(7);
        s.apply(Command::Stamp(Pattern::find("Blinker").unwrap())).unwrap();
        s.apply(Command::Next).unwrap();
        assert!(!s.cycle_detected());
        s.apply(Command::Next).unwrap();
        assert!(s.cycle_detected());
        assert_eq!(s.generation(), 2);
    }

    #[test]
    fn still_life_caught_on_first_step() {
        let config = LifeConfig {
            size: 6,
            stop_on_cycle: true,
            ..LifeConfig::default()
        };
        let mut s = Session::new(&config).unwrap();
        s.apply(Command::Clear).unwrap();
        s.apply(Command::Start).unwrap();
        assert!(s.tick());
        assert!(s.cycle_detected());
        assert!(!s.is_running());
        assert_eq!(s.generation(), 1);

        s.apply(Command::Toggle { row: 1, col: 1 }).unwrap();
        s.apply(Command::Toggle { row: 1, col: 2 }).unwrap();
        s.apply(Command::Toggle { row: 2, col: 1 }).unwrap();
        s.apply(Command::Toggle { row: 2, col: 2 }).unwrap();
        assert!(!s.cycle_detected());
        s.apply(Command::Next).unwrap();
        assert!(s.cycle_detected());
    }

    #[test]
    fn stop_on_cycle_pauses_running_session() {
        let config = LifeConfig {
            size: 6,
            stop_on_cycle: true,
            ..LifeConfig::default()
        };
        let mut s = Session::new(&config).unwrap();
        s.apply(Command::Stamp(Pattern::find("Beacon").unwrap())).unwrap();
        s.apply(Command::Start).unwrap();
        let mut ticks = 0;
        while s.tick() {
            ticks += 1;
            assert!(ticks < 10, "session never paused");
        }
        assert!(s.cycle_detected());
        assert_eq!(s.generation(), 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = LifeConfig { density: -1.0, ..LifeConfig::default() };
        assert!(Session::new(&config).is_err());
    }
}
