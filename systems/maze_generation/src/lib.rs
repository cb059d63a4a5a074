#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomised depth-first maze carving for Maze Chase.
//!
//! Generation runs in four ordered passes: the recursive backtracker carves a
//! spanning tree, the midpoints of the four outer edges are opened as
//! entrances, the 3x3 block around the centre is cleared, and finally interior
//! cells that are still walled on three or more sides have one random side
//! removed. Every wall change goes through [`Grid::remove_wall`], so the grid
//! stays symmetric throughout.

use maze_chase_core::{CellCoord, Direction};
use maze_chase_world::{Grid, GridError};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Neighbour collection order used while carving: up, down, left, right.
const CARVE_ORDER: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

/// Cells walled on at least this many sides count as dead ends.
const DEAD_END_WALLS: usize = 3;

/// Builds mazes from an injected random source.
#[derive(Debug)]
pub struct MazeGenerator<R> {
    rng: R,
}

impl MazeGenerator<ChaCha8Rng> {
    /// Creates a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Creates a generator drawing from the provided random source.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a fully post-processed maze of the requested size.
    pub fn generate(&mut self, columns: u32, rows: u32) -> Result<Grid, GridError> {
        let mut grid = self.carve_spanning_tree(columns, rows)?;
        carve_entrances(&mut grid);
        clear_center(&mut grid);
        self.relieve_dead_ends(&mut grid);

        debug!(
            columns,
            rows,
            dead_ends = grid
                .cells()
                .filter(|cell| cell.walls().closed_count() >= DEAD_END_WALLS)
                .count(),
            "maze generated"
        );

        Ok(grid)
    }

    /// Carves a spanning tree with the recursive backtracker and no
    /// post-processing: exactly one simple path joins any two cells.
    pub fn carve_spanning_tree(&mut self, columns: u32, rows: u32) -> Result<Grid, GridError> {
        let mut grid = Grid::new(columns, rows)?;

        let origin = CellCoord::new(0, 0);
        grid.mark_visited(origin);
        let mut stack = vec![origin];
        let mut candidates = Vec::with_capacity(CARVE_ORDER.len());

        while let Some(&current) = stack.last() {
            candidates.clear();
            candidates.extend(CARVE_ORDER.into_iter().filter_map(|direction| {
                grid.neighbor(current, direction)
                    .filter(|neighbor| !grid.is_visited(*neighbor))
                    .map(|neighbor| (direction, neighbor))
            }));

            match candidates.choose(&mut self.rng) {
                Some(&(direction, next)) => {
                    grid.remove_wall(current, direction);
                    grid.mark_visited(next);
                    stack.push(next);
                }
                None => {
                    let _ = stack.pop();
                }
            }
        }

        Ok(grid)
    }

    fn relieve_dead_ends(&mut self, grid: &mut Grid) {
        // The outer ring is skipped so entrances and edges stay as carved.
        for row in 1..grid.rows().saturating_sub(1) {
            for column in 1..grid.columns().saturating_sub(1) {
                let cell = CellCoord::new(column, row);
                let closed = grid.walls(cell).map_or(0, |walls| walls.closed_count());
                if closed >= DEAD_END_WALLS {
                    let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
                    grid.remove_wall(cell, direction);
                }
            }
        }
    }
}

fn carve_entrances(grid: &mut Grid) {
    for (cell, direction) in grid.entrances() {
        grid.remove_wall(cell, direction);
    }
}

fn clear_center(grid: &mut Grid) {
    let center = grid.center();
    let last_row = grid.rows() - 1;
    let last_column = grid.columns() - 1;
    let rows = center.row().saturating_sub(1)..=(center.row() + 1).min(last_row);
    let columns = center.column().saturating_sub(1)..=(center.column() + 1).min(last_column);

    for row in rows {
        for column in columns.clone() {
            for direction in Direction::ALL {
                grid.remove_wall(CellCoord::new(column, row), direction);
            }
        }
    }
}
