//! Dense wall grid that backs every maze.

use maze_chase_core::{CellCoord, Direction, Walls};
use thiserror::Error;

/// Single square of the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: CellCoord,
    walls: Walls,
    visited: bool,
}

impl Cell {
    /// Location of the cell within the grid.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Wall flags surrounding the cell.
    #[must_use]
    pub const fn walls(&self) -> Walls {
        self.walls
    }

    /// Whether maze carving has reached this cell.
    #[must_use]
    pub const fn visited(&self) -> bool {
        self.visited
    }
}

/// Rectangular collection of cells stored in row-major order.
///
/// Walls are symmetric: when the wall a cell presents toward a neighbour is
/// open, the neighbour's facing wall is open as well. [`Grid::remove_wall`] is
/// the only operation that opens walls and it always updates both sides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell carries all four walls and is unvisited.
    pub fn new(columns: u32, rows: u32) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 {
            return Err(GridError::EmptyDimensions { columns, rows });
        }

        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| CellCoord::new(column, row)))
            .map(|coord| Cell {
                coord,
                walls: Walls::closed(),
                visited: false,
            })
            .collect();

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Number of cell columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.column() < self.columns && coord.row() < self.rows
    }

    /// Cell stored at the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Iterator over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Wall flags of the cell at the coordinate.
    #[must_use]
    pub fn walls(&self, coord: CellCoord) -> Option<Walls> {
        self.cell(coord).map(Cell::walls)
    }

    /// Reports whether the cell's wall on the given side is present.
    ///
    /// Coordinates outside the grid are treated as fully walled.
    #[must_use]
    pub fn is_blocked(&self, coord: CellCoord, direction: Direction) -> bool {
        self.walls(coord)
            .map_or(true, |walls| walls.is_closed(direction))
    }

    /// Neighbouring coordinate in the given direction, if it lies inside the grid.
    #[must_use]
    pub fn neighbor(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        coord
            .step(direction)
            .filter(|candidate| self.contains(*candidate))
    }

    /// Neighbour reachable through an open wall in the given direction.
    #[must_use]
    pub fn open_neighbor(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        if self.is_blocked(coord, direction) {
            return None;
        }
        self.neighbor(coord, direction)
    }

    /// Reports whether two cells are orthogonally adjacent with no wall between them.
    #[must_use]
    pub fn is_passage(&self, from: CellCoord, to: CellCoord) -> bool {
        from.direction_to(to)
            .map_or(false, |direction| self.open_neighbor(from, direction) == Some(to))
    }

    /// Removes the wall on the given side of a cell together with the facing wall
    /// of the neighbour across it.
    ///
    /// On the outer boundary there is no neighbour and only the cell's own wall
    /// is opened. Coordinates outside the grid are ignored.
    pub fn remove_wall(&mut self, coord: CellCoord, direction: Direction) {
        let Some(index) = self.index(coord) else {
            return;
        };
        self.cells[index].walls.remove(direction);

        if let Some(neighbor_index) = self
            .neighbor(coord, direction)
            .and_then(|neighbor| self.index(neighbor))
        {
            self.cells[neighbor_index].walls.remove(direction.opposite());
        }
    }

    /// Marks the cell as reached by the carving pass.
    pub fn mark_visited(&mut self, coord: CellCoord) {
        if let Some(index) = self.index(coord) {
            self.cells[index].visited = true;
        }
    }

    /// Whether the carving pass already reached the cell. Out-of-grid cells
    /// count as visited so they are never carved into.
    #[must_use]
    pub fn is_visited(&self, coord: CellCoord) -> bool {
        self.cell(coord).map_or(true, Cell::visited)
    }

    /// Cell at the middle of the grid, where the goal sits.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(self.columns / 2, self.rows / 2)
    }

    /// Midpoint cells of the top, bottom, left, and right edges, paired with
    /// the outward direction of their entrance.
    #[must_use]
    pub const fn entrances(&self) -> [(CellCoord, Direction); 4] {
        let middle_column = self.columns / 2;
        let middle_row = self.rows / 2;
        [
            (CellCoord::new(middle_column, 0), Direction::North),
            (CellCoord::new(middle_column, self.rows - 1), Direction::South),
            (CellCoord::new(0, middle_row), Direction::West),
            (CellCoord::new(self.columns - 1, middle_row), Direction::East),
        ]
    }

    /// Flat offset of the coordinate within the cell storage.
    #[must_use]
    pub fn index(&self, coord: CellCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        let row = usize::try_from(coord.row()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no cells. Never true for a constructed grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Errors raised while constructing a grid.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grids need at least one column and one row.
    #[error("grid dimensions must be positive (received {columns}x{rows})")]
    EmptyDimensions {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
}
