//! Continuous motion of an agent along a discrete cell route.

use std::time::Duration;

use maze_chase_core::{AgentKind, CellCoord, Position};

/// Waypoint reached during a call to [`Agent::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentStep {
    /// Cell the agent occupied before snapping onto the waypoint.
    pub from: CellCoord,
    /// Waypoint cell the agent now occupies.
    pub to: CellCoord,
}

/// Autonomous agent that walks from cell centre to cell centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    kind: AgentKind,
    cell: CellCoord,
    position: Position,
    speed: f32,
    path: Vec<CellCoord>,
    path_index: usize,
}

impl Agent {
    /// Creates an agent resting on the centre of its starting cell.
    #[must_use]
    pub fn new(kind: AgentKind, cell: CellCoord, speed: f32, cell_size: f32) -> Self {
        Self {
            kind,
            cell,
            position: Position::cell_center(cell, cell_size),
            speed,
            path: Vec::new(),
            path_index: 0,
        }
    }

    /// Which agent this is.
    #[must_use]
    pub const fn kind(&self) -> AgentKind {
        self.kind
    }

    /// Cell the agent last snapped onto.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Continuous pixel position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Speed in cells per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Route currently being followed.
    #[must_use]
    pub fn path(&self) -> &[CellCoord] {
        &self.path
    }

    /// Index of the waypoint the agent is heading toward.
    #[must_use]
    pub const fn path_index(&self) -> usize {
        self.path_index
    }

    /// Reports whether both agents share a discrete cell.
    #[must_use]
    pub fn is_on_same_cell(&self, other: &Agent) -> bool {
        self.cell == other.cell
    }

    /// Replaces the route and restarts it from the first waypoint.
    ///
    /// An empty route is ignored so that a failed planning cycle never discards
    /// motion already in flight. A route toward the same destination as the
    /// unfinished current one is ignored as well: the agent keeps walking the
    /// route it committed to until it runs out or the destination moves.
    /// Returns whether the route was accepted.
    pub fn set_path(&mut self, path: Vec<CellCoord>) -> bool {
        if path.is_empty() {
            return false;
        }
        if self.path_index < self.path.len() && self.path.last() == path.last() {
            return false;
        }

        self.path = path;
        self.path_index = 0;
        true
    }

    /// Moves the agent toward its current waypoint for `dt` of simulated time.
    ///
    /// When the remaining distance fits within this tick's displacement the agent
    /// snaps exactly onto the waypoint centre and the route index advances;
    /// otherwise it slides along the straight line toward the waypoint.
    pub fn advance(&mut self, dt: Duration, cell_size: f32) -> Option<AgentStep> {
        self.skip_anchored_waypoint();

        let target = *self.path.get(self.path_index)?;
        let target_position = Position::cell_center(target, cell_size);
        let distance = self.position.distance_to(target_position);
        let displacement = self.speed * cell_size * dt.as_secs_f32();

        if distance <= displacement {
            let from = self.cell;
            self.position = target_position;
            self.cell = target;
            self.path_index += 1;
            return Some(AgentStep { from, to: target });
        }

        let ratio = displacement / distance;
        self.position.x += (target_position.x - self.position.x) * ratio;
        self.position.y += (target_position.y - self.position.y) * ratio;
        None
    }

    // Freshly planned routes begin at the agent's own cell. Heading back to that
    // centre every tick would pin the agent in place, so the leading waypoint is
    // dropped whenever a further one exists.
    fn skip_anchored_waypoint(&mut self) {
        while self.path_index + 1 < self.path.len() && self.path[self.path_index] == self.cell {
            self.path_index += 1;
        }
    }
}
