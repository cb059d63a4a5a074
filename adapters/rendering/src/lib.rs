#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Chase adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_chase_core::{AgentKind, CellCoord, Direction, GameState, Position, Walls};
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with a replaced alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether the player asked to start or resume the chase on this frame.
    pub start: bool,
    /// Whether the player asked to pause the chase on this frame.
    pub stop: bool,
    /// Whether the player asked for a freshly generated maze on this frame.
    pub reset: bool,
}

/// Time spent in each simulation stage while producing a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSimulationBreakdown {
    /// Total time spent advancing the world.
    pub simulation: Duration,
    /// Portion of the simulation spent planning routes.
    pub pathfinding: Duration,
    /// Time spent copying world state into the scene.
    pub scene_population: Duration,
}

/// Straight wall edge expressed in maze pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSegment {
    /// Start of the edge.
    pub from: Vec2,
    /// End of the edge.
    pub to: Vec2,
}

/// Describes the maze walls that adapters should stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct MazePresentation {
    /// Number of cell columns.
    pub columns: u32,
    /// Number of cell rows.
    pub rows: u32,
    /// Side length of a cell in maze pixels.
    pub cell_size: f32,
    /// Color used when stroking walls.
    pub line_color: Color,
    /// Closed wall edges, each listed once.
    pub walls: Vec<WallSegment>,
}

impl MazePresentation {
    /// Builds the wall segments for a maze from its per-cell wall flags.
    ///
    /// Every cell contributes its north and west edges. Cells on the last row
    /// add their south edge and cells on the last column their east edge, so
    /// shared edges are never stroked twice.
    pub fn from_cells<I>(
        columns: u32,
        rows: u32,
        cell_size: f32,
        line_color: Color,
        cells: I,
    ) -> Result<Self, RenderingError>
    where
        I: IntoIterator<Item = (CellCoord, Walls)>,
    {
        if columns == 0 || rows == 0 {
            return Err(RenderingError::EmptyMaze { columns, rows });
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }

        let mut walls = Vec::new();
        for (cell, flags) in cells {
            let left = cell.column() as f32 * cell_size;
            let top = cell.row() as f32 * cell_size;
            let right = left + cell_size;
            let bottom = top + cell_size;

            let mut stroke = |direction: Direction, from: Vec2, to: Vec2| {
                if flags.is_closed(direction) {
                    walls.push(WallSegment { from, to });
                }
            };

            stroke(
                Direction::North,
                Vec2::new(left, top),
                Vec2::new(right, top),
            );
            stroke(
                Direction::West,
                Vec2::new(left, top),
                Vec2::new(left, bottom),
            );
            if cell.row() + 1 == rows {
                stroke(
                    Direction::South,
                    Vec2::new(left, bottom),
                    Vec2::new(right, bottom),
                );
            }
            if cell.column() + 1 == columns {
                stroke(
                    Direction::East,
                    Vec2::new(right, top),
                    Vec2::new(right, bottom),
                );
            }
        }

        Ok(Self {
            columns,
            rows,
            cell_size,
            line_color,
            walls,
        })
    }

    /// Total width of the maze in maze pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Total height of the maze in maze pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Pixel-space centre of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        let Position { x, y } = Position::cell_center(cell, self.cell_size);
        Vec2::new(x, y)
    }
}

/// Visual identity drawn for each piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// The evader.
    Mouse,
    /// The pursuer.
    Cat,
    /// The goal.
    Cheese,
}

impl Glyph {
    /// Plain-text label for adapters limited to ASCII fonts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mouse => "MOUSE",
            Self::Cat => "CAT",
            Self::Cheese => "CHEESE",
        }
    }

    /// Fill color used when the glyph is drawn as a primitive.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Mouse => Color::from_rgb_u8(160, 160, 176),
            Self::Cat => Color::from_rgb_u8(230, 126, 34),
            Self::Cheese => Color::from_rgb_u8(241, 196, 15),
        }
    }
}

impl From<AgentKind> for Glyph {
    fn from(kind: AgentKind) -> Self {
        match kind {
            AgentKind::Evader => Self::Mouse,
            AgentKind::Pursuer => Self::Cat,
        }
    }
}

/// Agent drawn at its continuous position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentPresentation {
    /// Glyph identifying the agent.
    pub glyph: Glyph,
    /// Centre of the agent in maze pixels.
    pub position: Vec2,
}

impl AgentPresentation {
    /// Creates a new agent descriptor.
    #[must_use]
    pub fn new(kind: AgentKind, position: Position) -> Self {
        Self {
            glyph: Glyph::from(kind),
            position: Vec2::new(position.x, position.y),
        }
    }
}

/// Win screen shown once a session has ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutcomePresentation {
    /// Glyph of the winning agent.
    pub winner: Glyph,
}

impl OutcomePresentation {
    /// Creates the win screen for the provided winner.
    #[must_use]
    pub fn new(winner: AgentKind) -> Self {
        Self {
            winner: Glyph::from(winner),
        }
    }

    /// Headline announcing the winner.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{} WINS!", self.winner.label())
    }
}

/// Side panel hosting the Start, Stop, and Reset buttons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPanelView {
    /// Width of the panel in screen pixels.
    pub width: f32,
    /// Background fill of the panel.
    pub background: Color,
}

impl ControlPanelView {
    /// Creates a new control panel descriptor.
    #[must_use]
    pub const fn new(width: f32, background: Color) -> Self {
        Self { width, background }
    }
}

/// Scene description combining the maze, goal, agents, and session chrome.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Maze walls.
    pub maze: MazePresentation,
    /// Cell holding the cheese.
    pub goal: CellCoord,
    /// Agents in advancement order.
    pub agents: Vec<AgentPresentation>,
    /// Lifecycle state shown in the control panel.
    pub game_state: GameState,
    /// Win screen, present once the session has ended.
    pub outcome: Option<OutcomePresentation>,
    /// Optional control panel drawn beside the maze.
    pub control_panel: Option<ControlPanelView>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        maze: MazePresentation,
        goal: CellCoord,
        agents: Vec<AgentPresentation>,
        game_state: GameState,
        outcome: Option<OutcomePresentation>,
        control_panel: Option<ControlPanelView>,
    ) -> Self {
        Self {
            maze,
            goal,
            agents,
            game_state,
            outcome,
            control_panel,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Chase scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and refreshes the scene before it is
    /// drawn. It reports how long each simulation stage took.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameSimulationBreakdown + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// A maze needs at least one cell.
    #[error("maze must have at least one cell (received {columns}x{rows})")]
    EmptyMaze {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: u32,
    },
    /// Cells must have a positive size.
    #[error("cell size must be a positive number (received {cell_size})")]
    InvalidCellSize {
        /// Provided cell size that failed validation.
        cell_size: f32,
    },
}
