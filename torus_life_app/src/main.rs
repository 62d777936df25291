// main.rs - Conway's Game of Life on a torus, in a window or a terminal

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use torus_life::{Command, DEFAULT_DELAY, DEFAULT_DENSITY, DEFAULT_SIZE, LifeConfig, PATTERNS, Pattern, Session};
use tracing::info;

mod headless;
mod layout;
mod palette;
mod ui;

#[derive(Parser, Debug)]
#[command(name = "torus-life", version, about = "Conway's Game of Life on a toroidal grid")]
struct Args {
    /// Edge length of the square grid
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Probability that Randomize brings a cell to life
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    density: f64,

    /// Milliseconds between generations while running
    #[arg(long = "delay-ms", default_value_t = DEFAULT_DELAY.as_millis() as u64)]
    delay_ms: u64,

    /// Seed for Randomize (drawn from the OS when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Start from a named pattern, e.g. "Glider" or "Pulsar"
    #[arg(long)]
    pattern: Option<String>,

    /// Pause as soon as a generation repeats a recent one
    #[arg(long)]
    stop_on_cycle: bool,

    /// Print generations to stdout instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Stop after this many generations (headless only)
    #[arg(long, requires = "headless")]
    generations: Option<u64>,

    /// Edge of one cell in points
    #[arg(long, default_value_t = layout::CELL_SIZE)]
    cell_size: f32,
}

impl Args {
    fn config(&self) -> LifeConfig {
        LifeConfig {
            size: self.size,
            density: self.density,
            delay: Duration::from_millis(self.delay_ms),
            seed: self.seed,
            stop_on_cycle: self.stop_on_cycle,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut session = Session::new(&args.config()).context("invalid simulation settings")?;
    match &args.pattern {
        Some(name) => {
            let pattern = Pattern::find(name).with_context(|| {
                let known: Vec<_> = PATTERNS.iter().map(|p| p.name).collect();
                format!("unknown pattern {name:?}; expected one of {}", known.join(", "))
            })?;
            session.apply(Command::Stamp(pattern))?;
        }
        None if args.headless => session.apply(Command::Randomize)?,
        None => {}
    }

    if args.headless {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start tokio runtime")?;
        let last = runtime.block_on(headless::run(session, args.generations, &mut std::io::stdout()))?;
        info!(generation = last, "headless run finished");
        return Ok(());
    }

    info!(size = args.size, "opening window");
    ui::run(session, args.cell_size).map_err(|err| anyhow!("window closed with error: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_the_classic_board() {
        let args = Args::parse_from(["torus-life"]);
        assert_eq!(args.config(), LifeConfig::default());
        assert!(!args.headless);
        assert_eq!(args.delay_ms as u128, DEFAULT_DELAY.as_millis());
    }

    #[test]
    fn flags_flow_into_config() {
        let args = Args::parse_from([
            "torus-life", "--size", "12", "--density", "0.5", "--delay-ms", "10",
            "--seed", "9", "--stop-on-cycle", "--headless", "--generations", "4",
        ]);
        let config = args.config();
        assert_eq!(config.size, 12);
        assert_eq!(config.density, 0.5);
        assert_eq!(config.delay, Duration::from_millis(10));
        assert_eq!(config.seed, Some(9));
        assert!(config.stop_on_cycle);
        assert_eq!(args.generations, Some(4));
    }

    #[test]
    fn generations_requires_headless() {
        assert!(Args::try_parse_from(["torus-life", "--generations", "3"]).is_err());
    }
}
