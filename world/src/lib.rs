#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.

mod agent;
mod grid;

use maze_chase_core::{AgentKind, CellCoord, Command, Event, GameState, WELCOME_BANNER};
use thiserror::Error;
use tracing::{debug, info, trace};

pub use agent::{Agent, AgentStep};
pub use grid::{Cell, Grid, GridError};

/// Starting cell and speed for one agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSetup {
    /// Cell the agent spawns on.
    pub cell: CellCoord,
    /// Speed in cells per second.
    pub speed: f32,
}

/// Everything besides the maze required to assemble a world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldSetup {
    /// Side length of a cell in pixels.
    pub cell_size: f32,
    /// Cell the evader is trying to reach.
    pub goal: CellCoord,
    /// Evader spawn parameters.
    pub evader: AgentSetup,
    /// Pursuer spawn parameters.
    pub pursuer: AgentSetup,
}

/// Represents the authoritative Maze Chase session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    cell_size: f32,
    goal: CellCoord,
    evader: Agent,
    pursuer: Agent,
    state: GameState,
    winner: Option<AgentKind>,
    tick_index: u64,
}

impl World {
    /// Assembles a stopped session around an already generated maze.
    pub fn new(grid: Grid, setup: WorldSetup) -> Result<Self, WorldError> {
        if !setup.cell_size.is_finite() || setup.cell_size <= 0.0 {
            return Err(WorldError::InvalidCellSize {
                cell_size: setup.cell_size,
            });
        }
        if !grid.contains(setup.goal) {
            return Err(WorldError::GoalOutsideGrid { cell: setup.goal });
        }

        let evader = spawn_agent(&grid, AgentKind::Evader, setup.evader, setup.cell_size)?;
        let pursuer = spawn_agent(&grid, AgentKind::Pursuer, setup.pursuer, setup.cell_size)?;

        Ok(Self {
            banner: WELCOME_BANNER,
            grid,
            cell_size: setup.cell_size,
            goal: setup.goal,
            evader,
            pursuer,
            state: GameState::Stopped,
            winner: None,
            tick_index: 0,
        })
    }

    fn agent(&self, kind: AgentKind) -> &Agent {
        match kind {
            AgentKind::Evader => &self.evader,
            AgentKind::Pursuer => &self.pursuer,
        }
    }

    fn agent_mut(&mut self, kind: AgentKind) -> &mut Agent {
        match kind {
            AgentKind::Evader => &mut self.evader,
            AgentKind::Pursuer => &mut self.pursuer,
        }
    }

    fn transition(&mut self, state: GameState, out_events: &mut Vec<Event>) {
        if self.state == state {
            return;
        }
        info!(from = ?self.state, to = ?state, "game state changed");
        self.state = state;
        out_events.push(Event::GameStateChanged { state });
    }

    fn is_valid_route(&self, path: &[CellCoord]) -> bool {
        path.iter().all(|cell| self.grid.contains(*cell))
            && path
                .windows(2)
                .all(|pair| self.grid.is_passage(pair[0], pair[1]))
    }

    // Pursuer catch is evaluated first so it wins a tick where both agents
    // satisfy their condition.
    fn resolve_winner(&self) -> Option<AgentKind> {
        if self.pursuer.is_on_same_cell(&self.evader) {
            Some(AgentKind::Pursuer)
        } else if self.evader.cell() == self.goal {
            Some(AgentKind::Evader)
        } else {
            None
        }
    }
}

fn spawn_agent(
    grid: &Grid,
    kind: AgentKind,
    setup: AgentSetup,
    cell_size: f32,
) -> Result<Agent, WorldError> {
    let AgentSetup { cell, speed } = setup;
    if !grid.contains(cell) {
        return Err(WorldError::StartOutsideGrid { agent: kind, cell });
    }
    if !speed.is_finite() || speed <= 0.0 {
        return Err(WorldError::InvalidSpeed { agent: kind, speed });
    }
    Ok(Agent::new(kind, cell, speed, cell_size))
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start => {
            if world.state == GameState::Stopped {
                world.transition(GameState::Running, out_events);
            }
        }
        Command::Stop => {
            if world.state == GameState::Running {
                world.transition(GameState::Stopped, out_events);
            }
        }
        Command::Tick { dt } => {
            if world.state != GameState::Running {
                return;
            }

            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            let cell_size = world.cell_size;
            for kind in AgentKind::ALL {
                if let Some(AgentStep { from, to }) = world.agent_mut(kind).advance(dt, cell_size) {
                    trace!(agent = ?kind, ?from, ?to, "agent reached waypoint");
                    out_events.push(Event::AgentAdvanced {
                        agent: kind,
                        from,
                        to,
                    });
                }
            }

            if let Some(winner) = world.resolve_winner() {
                world.winner = Some(winner);
                out_events.push(Event::GameWon { winner });
                world.transition(GameState::Ended, out_events);
            }
        }
        Command::SetAgentPath { agent, path } => {
            if world.state == GameState::Ended {
                return;
            }
            if !world.is_valid_route(&path) {
                debug!(?agent, len = path.len(), "ignoring malformed route");
                return;
            }
            let _ = world.agent_mut(agent).set_path(path);
        }
    }
}

/// Errors raised while assembling a world.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum WorldError {
    /// The pixel size of a cell must be a positive number.
    #[error("cell size must be a positive number (received {cell_size})")]
    InvalidCellSize {
        /// Rejected cell size.
        cell_size: f32,
    },
    /// The goal lies outside the maze.
    #[error("goal {cell:?} lies outside the grid")]
    GoalOutsideGrid {
        /// Rejected goal cell.
        cell: CellCoord,
    },
    /// An agent would spawn outside the maze.
    #[error("{agent:?} start {cell:?} lies outside the grid")]
    StartOutsideGrid {
        /// Agent whose start was rejected.
        agent: AgentKind,
        /// Rejected start cell.
        cell: CellCoord,
    },
    /// An agent speed was zero, negative, or not finite.
    #[error("{agent:?} speed must be a positive number (received {speed})")]
    InvalidSpeed {
        /// Agent whose speed was rejected.
        agent: AgentKind,
        /// Rejected speed.
        speed: f32,
    },
}

/// Query functions that expose read-only world state to adapters and systems.
pub mod query {
    use super::{Agent, Grid, World};
    use maze_chase_core::{AgentKind, CellCoord, GameState, Position};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the maze grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Side length of a cell in pixels.
    #[must_use]
    pub fn cell_size(world: &World) -> f32 {
        world.cell_size
    }

    /// Cell the evader is trying to reach.
    #[must_use]
    pub fn goal(world: &World) -> CellCoord {
        world.goal
    }

    /// Current lifecycle state of the session.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.state
    }

    /// Winner of the session, once it has ended.
    #[must_use]
    pub fn winner(world: &World) -> Option<AgentKind> {
        world.winner
    }

    /// Number of ticks processed while running.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures a read-only snapshot of one agent.
    #[must_use]
    pub fn agent(world: &World, kind: AgentKind) -> AgentSnapshot {
        AgentSnapshot::from(world.agent(kind))
    }

    /// Captures both agents in advancement order.
    #[must_use]
    pub fn agents(world: &World) -> [AgentSnapshot; 2] {
        AgentKind::ALL.map(|kind| agent(world, kind))
    }

    /// Immutable representation of an agent used by systems and adapters.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct AgentSnapshot {
        /// Which agent the snapshot describes.
        pub kind: AgentKind,
        /// Cell the agent last snapped onto.
        pub cell: CellCoord,
        /// Continuous pixel position.
        pub position: Position,
        /// Speed in cells per second.
        pub speed: f32,
    }

    impl From<&Agent> for AgentSnapshot {
        fn from(agent: &Agent) -> Self {
            Self {
                kind: agent.kind(),
                cell: agent.cell(),
                position: agent.position(),
                speed: agent.speed(),
            }
        }
    }
}
