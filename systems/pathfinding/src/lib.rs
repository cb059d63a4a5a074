#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Depth-first route planning for both Maze Chase agents.
//!
//! Routes come from an iterative depth-first search rather than a
//! breadth-first one, so they are valid but not necessarily shortest. The
//! fixed expansion order combined with the LIFO stack makes every route
//! deterministic for a given maze.

use maze_chase_core::{AgentKind, CellCoord, Command, Direction, GameState};
use maze_chase_world::{query::AgentSnapshot, Grid};
use tracing::warn;

/// Order in which open neighbours are pushed: up, down, left, right.
const EXPANSION_ORDER: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

/// Finds a route from `start` to `target`, both inclusive.
///
/// Returns an empty route when either cell lies outside the grid or the target
/// cannot be reached.
#[must_use]
pub fn find_path(grid: &Grid, start: CellCoord, target: CellCoord) -> Vec<CellCoord> {
    DepthFirstSearch::default().find(grid, start, target)
}

/// Reusable scratch space for repeated depth-first searches.
#[derive(Debug, Default)]
pub struct DepthFirstSearch {
    stack: Vec<CellCoord>,
    visited: Vec<bool>,
    parents: Vec<Option<CellCoord>>,
}

impl DepthFirstSearch {
    /// Finds a route from `start` to `target` reusing the internal buffers.
    pub fn find(&mut self, grid: &Grid, start: CellCoord, target: CellCoord) -> Vec<CellCoord> {
        let Some(start_index) = grid.index(start) else {
            return Vec::new();
        };
        if !grid.contains(target) {
            return Vec::new();
        }

        self.reset(grid.len());
        self.visited[start_index] = true;
        self.stack.push(start);

        while let Some(current) = self.stack.pop() {
            if current == target {
                return self.reconstruct(grid, current);
            }

            for direction in EXPANSION_ORDER {
                let Some(next) = grid.open_neighbor(current, direction) else {
                    continue;
                };
                let Some(index) = grid.index(next) else {
                    continue;
                };
                if self.visited[index] {
                    continue;
                }

                self.visited[index] = true;
                self.parents[index] = Some(current);
                self.stack.push(next);
            }
        }

        Vec::new()
    }

    fn reset(&mut self, cell_count: usize) {
        self.stack.clear();
        self.visited.clear();
        self.visited.resize(cell_count, false);
        self.parents.clear();
        self.parents.resize(cell_count, None);
    }

    fn reconstruct(&self, grid: &Grid, end: CellCoord) -> Vec<CellCoord> {
        let mut path = vec![end];
        let mut current = end;
        while let Some(parent) = grid
            .index(current)
            .and_then(|index| self.parents.get(index).copied().flatten())
        {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

/// Pure system that re-plans both agents once per running tick.
#[derive(Debug, Default)]
pub struct Planner {
    search: DepthFirstSearch,
}

impl Planner {
    /// Emits one [`Command::SetAgentPath`] per agent: the evader toward the
    /// goal and the pursuer toward the evader's current cell.
    pub fn handle(
        &mut self,
        game_state: GameState,
        grid: &Grid,
        goal: CellCoord,
        agents: &[AgentSnapshot],
        out: &mut Vec<Command>,
    ) {
        if game_state != GameState::Running {
            return;
        }

        let cell_of = |kind: AgentKind| {
            agents
                .iter()
                .find(|snapshot| snapshot.kind == kind)
                .map(|snapshot| snapshot.cell)
        };
        let (Some(evader), Some(pursuer)) = (cell_of(AgentKind::Evader), cell_of(AgentKind::Pursuer))
        else {
            return;
        };

        for (agent, start, target) in [
            (AgentKind::Evader, evader, goal),
            (AgentKind::Pursuer, pursuer, evader),
        ] {
            let path = self.search.find(grid, start, target);
            if path.is_empty() && grid.contains(start) && grid.contains(target) {
                warn!(?agent, ?start, ?target, "no route inside a connected maze");
            }
            out.push(Command::SetAgentPath { agent, path });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_are_reused_between_searches() {
        let mut grid = Grid::new(2, 1).expect("positive dimensions");
        grid.remove_wall(CellCoord::new(0, 0), Direction::East);
        let mut search = DepthFirstSearch::default();

        let first = search.find(&grid, CellCoord::new(0, 0), CellCoord::new(1, 0));
        let second = search.find(&grid, CellCoord::new(1, 0), CellCoord::new(0, 0));

        assert_eq!(first, vec![CellCoord::new(0, 0), CellCoord::new(1, 0)]);
        assert_eq!(second, vec![CellCoord::new(1, 0), CellCoord::new(0, 0)]);
        assert_eq!(search.visited.len(), 2);
    }

    #[test]
    fn start_has_no_parent() {
        let grid = Grid::new(1, 1).expect("positive dimensions");
        let mut search = DepthFirstSearch::default();

        let path = search.find(&grid, CellCoord::new(0, 0), CellCoord::new(0, 0));

        assert_eq!(path, vec![CellCoord::new(0, 0)]);
        assert_eq!(search.parents, vec![None]);
    }
}
