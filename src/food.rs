use rand::Rng;
use rand::seq::SliceRandom;

use crate::grid::{Cell, Grid};
use crate::snake::Snake;

/// Picks a free cell uniformly at random, or `None` when the snake covers
/// the whole grid.
pub fn place<R: Rng + ?Sized>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Cell> {
    let free: Vec<Cell> = grid.cells().filter(|c| !snake.occupies(*c)).collect();
    free.choose(rng).copied()
}
