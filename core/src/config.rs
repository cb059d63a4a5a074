//! Constructor-time configuration for a Maze Chase session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AgentKind, CellCoord};

/// Smallest edge length, in cells, that fits the cleared centre block.
pub const MIN_GRID_EDGE: u32 = 3;

/// Settings consumed once when a session is built. Nothing here changes at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playing field in pixels.
    pub canvas_width: u32,
    /// Height of the playing field in pixels.
    pub canvas_height: u32,
    /// Side length of a single square cell in pixels.
    pub cell_size: u32,
    /// Evader speed in cells per second before the multiplier applies.
    pub evader_speed: f32,
    /// Pursuer base speed in cells per second before jitter and multiplier apply.
    pub pursuer_speed: f32,
    /// Random bonus added to the pursuer's base speed.
    pub pursuer_speed_jitter: SpeedJitter,
    /// Uniform scale applied to both agents' speeds.
    pub speed_multiplier: f32,
    /// Fixed evader start cell; a random entrance is used when absent.
    pub evader_start: Option<CellCoord>,
    /// Fixed pursuer start cell; a random entrance is used when absent.
    pub pursuer_start: Option<CellCoord>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            cell_size: 20,
            evader_speed: 1.0,
            pursuer_speed: 1.0,
            pursuer_speed_jitter: SpeedJitter::default(),
            speed_multiplier: 1.0,
            evader_start: None,
            pursuer_start: None,
        }
    }
}

impl GameConfig {
    /// Grid dimensions implied by the canvas and cell size.
    pub fn grid_dimensions(&self) -> Result<GridDimensions, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let columns = self.canvas_width / self.cell_size;
        let rows = self.canvas_height / self.cell_size;
        if columns < MIN_GRID_EDGE || rows < MIN_GRID_EDGE {
            return Err(ConfigError::GridTooSmall { columns, rows });
        }

        Ok(GridDimensions { columns, rows })
    }

    /// Checks every field and returns the derived grid dimensions.
    pub fn validate(&self) -> Result<GridDimensions, ConfigError> {
        let dimensions = self.grid_dimensions()?;

        check_speed(AgentKind::Evader, self.evader_speed)?;
        check_speed(AgentKind::Pursuer, self.pursuer_speed)?;

        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(ConfigError::InvalidSpeedMultiplier {
                multiplier: self.speed_multiplier,
            });
        }

        let SpeedJitter { min, max } = self.pursuer_speed_jitter;
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::InvalidJitter { min, max });
        }

        for (agent, start) in [
            (AgentKind::Evader, self.evader_start),
            (AgentKind::Pursuer, self.pursuer_start),
        ] {
            if let Some(cell) = start {
                if !dimensions.contains(cell) {
                    return Err(ConfigError::StartOutsideGrid {
                        agent,
                        cell,
                        columns: dimensions.columns,
                        rows: dimensions.rows,
                    });
                }
            }
        }

        Ok(dimensions)
    }
}

fn check_speed(agent: AgentKind, speed: f32) -> Result<(), ConfigError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeed { agent, speed })
    }
}

/// Half-open range `[min, max)` sampled once per session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedJitter {
    /// Smallest bonus in cells per second.
    pub min: f32,
    /// Exclusive upper bound of the bonus in cells per second.
    pub max: f32,
}

impl Default for SpeedJitter {
    fn default() -> Self {
        Self {
            min: 0.15,
            max: 0.20,
        }
    }
}

/// Number of columns and rows in the maze grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    /// Number of cell columns.
    pub columns: u32,
    /// Number of cell rows.
    pub rows: u32,
}

impl GridDimensions {
    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }
}

/// Reasons a configuration cannot produce a playable session.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The cell size must be positive to derive grid dimensions.
    #[error("cell_size must be positive")]
    ZeroCellSize,
    /// The canvas holds fewer cells than the centre block needs.
    #[error("grid of {columns}x{rows} cells is smaller than the 3x3 minimum")]
    GridTooSmall {
        /// Columns derived from the canvas width.
        columns: u32,
        /// Rows derived from the canvas height.
        rows: u32,
    },
    /// An agent speed was zero, negative, or not finite.
    #[error("{agent:?} speed must be a positive number (received {speed})")]
    InvalidSpeed {
        /// Agent whose speed was rejected.
        agent: AgentKind,
        /// Rejected speed in cells per second.
        speed: f32,
    },
    /// The speed multiplier was zero, negative, or not finite.
    #[error("speed_multiplier must be a positive number (received {multiplier})")]
    InvalidSpeedMultiplier {
        /// Rejected multiplier.
        multiplier: f32,
    },
    /// The jitter range was negative, inverted, or not finite.
    #[error("pursuer speed jitter range [{min}, {max}) is invalid")]
    InvalidJitter {
        /// Lower bound of the rejected range.
        min: f32,
        /// Upper bound of the rejected range.
        max: f32,
    },
    /// A configured start cell lies outside the derived grid.
    #[error("{agent:?} start {cell:?} lies outside the {columns}x{rows} grid")]
    StartOutsideGrid {
        /// Agent whose start cell was rejected.
        agent: AgentKind,
        /// Rejected start cell.
        cell: CellCoord,
        /// Columns derived from the canvas width.
        columns: u32,
        /// Rows derived from the canvas height.
        rows: u32,
    },
}
