use rand::Rng;
use rand::rngs::ThreadRng;

use super::grid::{Cell, Grid};

/// Picks an unoccupied cell for the next food drop
pub struct FoodSpawner<R = ThreadRng> {
    grid: Grid,
    rng: R,
}

impl FoodSpawner<ThreadRng> {
    /// Create a spawner backed by the thread-local RNG
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, rand::thread_rng())
    }
}

impl<R: Rng> FoodSpawner<R> {
    /// Create a spawner with an injected RNG, for seeded play and tests
    pub fn with_rng(grid: Grid, rng: R) -> Self {
        Self { grid, rng }
    }

    /// Draw a free cell by uniform rejection sampling
    ///
    /// Draws uniformly over the whole grid and redraws while the cell is
    /// occupied. The caller must leave at least one cell free; beyond that
    /// the loop carries no termination bound.
    pub fn spawn(&mut self, occupied: &[Cell]) -> Cell {
        assert!(
            occupied.len() < self.grid.cell_count(),
            "food spawner needs at least one free cell"
        );

        loop {
            let cell = Cell::new(
                self.rng.gen_range(0..self.grid.size()) as i32,
                self.rng.gen_range(0..self.grid.size()) as i32,
            );

            if !occupied.contains(&cell) {
                return cell;
            }
        }
    }
}
