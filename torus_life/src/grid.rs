// grid.rs - Toroidal grid for Conway's Game of Life

use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;
use tracing::{debug, trace};

use crate::error::GridError;

/// Default edge length of the playing area (50x50).
pub const DEFAULT_SIZE: usize = 50;
/// Default probability that `randomize` brings a cell to life.
pub const DEFAULT_DENSITY: f64 = 1.0 / 5.0;

/// A square grid of cells whose edges wrap around (a torus).
///
/// Cells live in a row-major front buffer. [`LifeGrid::step`] computes the next
/// generation into a back buffer from an untouched snapshot of the front one,
/// then swaps the two, so no cell ever sees a neighbour's already-updated state.
#[derive(Debug, Clone)]
pub struct LifeGrid {
    size: usize,
    cells: Vec<bool>,
    next: Vec<bool>,
}

impl LifeGrid {
    /// Creates a `size` x `size` grid with every cell dead.
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::InvalidSize { size });
        }
        let area = size
            .checked_mul(size)
            .ok_or(GridError::InvalidSize { size })?;
        Ok(Self {
            size,
            cells: vec![false; area],
            next: vec![false; area],
        })
    }

    /// Edge length `N` of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let index = self.index(row, col)?;
        Ok(self.cells[index])
    }

    /// Flips a single cell. Nothing else is touched or recomputed.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let index = self.index(row, col)?;
        self.cells[index] = !self.cells[index];
        trace!(row, col, alive = self.cells[index], "toggled cell");
        Ok(())
    }

    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let index = self.index(row, col)?;
        self.cells[index] = alive;
        Ok(())
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        debug!(size = self.size, "cleared grid");
    }

    /// Re-seeds every cell independently from the thread-local generator.
    pub fn randomize(&mut self, density: f64) -> Result<(), GridError> {
        self.randomize_with(&mut rand::rng(), density)
    }

    /// Re-seeds every cell: alive with probability `density`, dead otherwise.
    ///
    /// `density` must lie in `[0.0, 1.0]`; anything else (NaN included) is
    /// rejected before a single cell changes.
    pub fn randomize_with<R: Rng>(
        &mut self,
        rng: &mut R,
        density: f64,
    ) -> Result<(), GridError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(GridError::InvalidDensity { density });
        }
        for cell in self.cells.iter_mut() {
            *cell = rng.random_bool(density);
        }
        debug!(density, population = self.population(), "randomized grid");
        Ok(())
    }

    /// Number of live cells among the eight around (`row`, `col`), with both
    /// indices wrapped modulo `N`. The centre cell itself is never counted.
    pub fn neighbor_count(&self, row: usize, col: usize) -> Result<u8, GridError> {
        self.index(row, col)?;
        Ok(count_live(&self.cells, self.size, row, col))
    }

    /// Advances one generation (B3/S23).
    pub fn step(&mut self) {
        let size = self.size;
        for row in 0..size {
            for col in 0..size {
                let index = row * size + col;
                let count = count_live(&self.cells, size, row, col);
                self.next[index] = next_state(self.cells[index], count);
            }
        }
        std::mem::swap(&mut self.cells, &mut self.next);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Row slices of the current generation, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Coordinates of every live cell in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(index, _)| (index / size, index % size))
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row < self.size && col < self.size {
            Ok(row * self.size + col)
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }
}

fn count_live(cells: &[bool], size: usize, row: usize, col: usize) -> u8 {
    let up = (row + size - 1) % size;
    let down = (row + 1) % size;
    let left = (col + size - 1) % size;
    let right = (col + 1) % size;

    let neighbors = [
        (up, left),   (up, col),   (up, right),
        (row, left),               (row, right),
        (down, left), (down, col), (down, right),
    ];

    // On a 1x1 grid every offset wraps back onto the centre cell; on 2x2 the
    // same neighbour is reached through several offsets and counts each time.
    let mut count = 0;
    for &(nr, nc) in &neighbors {
        if (nr, nc) == (row, col) {
            continue;
        }
        if cells[nr * size + nc] {
            count += 1;
        }
    }
    count
}

fn next_state(alive: bool, count: u8) -> bool {
    match (alive, count) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

// Only the current generation takes part; the back buffer is scratch space.
impl PartialEq for LifeGrid {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for LifeGrid {}

impl Hash for LifeGrid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.cells.hash(state);
    }
}

impl fmt::Display for LifeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &alive in row {
                f.write_str(if alive { "O" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
