//! Conway's Game of Life on a fixed-size torus.
//!
//! [`LifeGrid`] holds the cells and the B3/S23 rule; [`Session`] wraps a grid
//! with the running/exit flags a driver loop needs. Neither knows anything
//! about windows or terminals.

pub mod config;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod session;

pub use config::{DEFAULT_DELAY, LifeConfig};
pub use error::GridError;
pub use grid::{DEFAULT_DENSITY, DEFAULT_SIZE, LifeGrid};
pub use patterns::{PATTERNS, Pattern};
pub use session::{Command, Session};
