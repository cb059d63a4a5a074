#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! changed. Systems query immutable snapshots and respond exclusively with new
//! command batches.

mod config;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, GameConfig, GridDimensions, SpeedJitter, MIN_GRID_EDGE};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Lifecycle of a single game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameState {
    /// The session exists but the simulation clock is paused.
    #[default]
    Stopped,
    /// Ticks advance the agents and evaluate the win condition.
    Running,
    /// A winner was determined; the session no longer advances.
    Ended,
}

/// Identifies one of the two autonomous agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentKind {
    /// Agent that seeks the goal cell (the mouse).
    Evader,
    /// Agent that seeks the evader's current cell (the cat).
    Pursuer,
}

impl AgentKind {
    /// Both agents in the order the world advances them.
    pub const ALL: [AgentKind; 2] = [AgentKind::Evader, AgentKind::Pursuer];
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests that a stopped session begin running.
    Start,
    /// Requests that a running session pause.
    Stop,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Replaces the route an agent follows.
    SetAgentPath {
        /// Agent receiving the route.
        agent: AgentKind,
        /// Ordered cells from the agent's cell to its target, both inclusive.
        path: Vec<CellCoord>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the session entered a new game state.
    GameStateChanged {
        /// State that became active after processing the command.
        state: GameState,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an agent snapped onto a waypoint cell.
    AgentAdvanced {
        /// Agent that reached the waypoint.
        agent: AgentKind,
        /// Cell the agent occupied before the waypoint was reached.
        from: CellCoord,
        /// Cell the agent occupies after snapping onto the waypoint.
        to: CellCoord,
    },
    /// Reports the outcome of the session.
    GameWon {
        /// Agent that satisfied its win condition.
        winner: AgentKind,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Coordinate one step away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant; the
    /// upper grid bounds are the caller's concern.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }

    /// Direction leading from `self` to an orthogonally adjacent cell.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.step(*direction) == Some(other))
    }
}

/// Cardinal directions separating a cell from its neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward decreasing row indices (the top wall).
    North,
    /// Toward increasing column indices (the right wall).
    East,
    /// Toward increasing row indices (the bottom wall).
    South,
    /// Toward decreasing column indices (the left wall).
    West,
}

impl Direction {
    /// Every direction in wall order: top, right, bottom, left.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction pointing back across the same wall.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Presence flags for the four walls surrounding a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Walls {
    north: bool,
    east: bool,
    south: bool,
    west: bool,
}

impl Walls {
    /// Walls with every side present.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            north: true,
            east: true,
            south: true,
            west: true,
        }
    }

    /// Walls with every side removed.
    #[must_use]
    pub const fn open() -> Self {
        Self {
            north: false,
            east: false,
            south: false,
            west: false,
        }
    }

    /// Reports whether the wall on the provided side is present.
    #[must_use]
    pub const fn is_closed(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// Removes the wall on the provided side.
    pub fn remove(&mut self, direction: Direction) {
        match direction {
            Direction::North => self.north = false,
            Direction::East => self.east = false,
            Direction::South => self.south = false,
            Direction::West => self.west = false,
        }
    }

    /// Number of sides that still carry a wall.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.is_closed(*direction))
            .count()
    }
}

impl Default for Walls {
    fn default() -> Self {
        Self::closed()
    }
}

/// Continuous position measured in pixels from the maze's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset in pixels.
    pub x: f32,
    /// Vertical offset in pixels.
    pub y: f32,
}

impl Position {
    /// Creates a new pixel position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pixel-space centre of the provided cell.
    #[must_use]
    pub fn cell_center(cell: CellCoord, cell_size: f32) -> Self {
        let half = cell_size / 2.0;
        Self {
            x: cell.column() as f32 * cell_size + half,
            y: cell.row() as f32 * cell_size + half,
        }
    }

    /// Straight-line distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}
