use maze_chase_core::{AgentKind, CellCoord, Command, Direction, GameConfig, GameState, Position};
use maze_chase_system_maze_generation::MazeGenerator;
use maze_chase_system_pathfinding::{find_path, DepthFirstSearch, Planner};
use maze_chase_world::{query::AgentSnapshot, Grid};

fn open_grid(columns: u32, rows: u32) -> Grid {
    let mut grid = Grid::new(columns, rows).expect("positive dimensions");
    for row in 0..rows {
        for column in 0..columns {
            let cell = CellCoord::new(column, row);
            if column + 1 < columns {
                grid.remove_wall(cell, Direction::East);
            }
            if row + 1 < rows {
                grid.remove_wall(cell, Direction::South);
            }
        }
    }
    grid
}

fn assert_valid_route(grid: &Grid, route: &[CellCoord], start: CellCoord, target: CellCoord) {
    assert_eq!(route.first(), Some(&start));
    assert_eq!(route.last(), Some(&target));
    for pair in route.windows(2) {
        assert!(
            grid.is_passage(pair[0], pair[1]),
            "route crosses a wall between {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
    let mut unique = route.to_vec();
    unique.sort_by_key(|cell| (cell.row(), cell.column()));
    unique.dedup();
    assert_eq!(unique.len(), route.len(), "route revisits a cell");
}

fn snapshot(kind: AgentKind, cell: CellCoord) -> AgentSnapshot {
    AgentSnapshot {
        kind,
        cell,
        position: Position::cell_center(cell, 20.0),
        speed: 1.0,
    }
}

#[test]
fn corners_of_a_generated_maze_are_connected() {
    let config = GameConfig {
        canvas_width: 100,
        canvas_height: 100,
        cell_size: 20,
        ..GameConfig::default()
    };
    let dimensions = config.grid_dimensions().expect("5x5 grid");
    assert_eq!((dimensions.columns, dimensions.rows), (5, 5));
    let grid = MazeGenerator::from_seed(2024)
        .generate(dimensions.columns, dimensions.rows)
        .expect("positive dimensions");
    let start = CellCoord::new(0, 0);
    let target = CellCoord::new(4, 4);

    let route = find_path(&grid, start, target);

    assert_valid_route(&grid, &route, start, target);
}

#[test]
fn routes_through_generated_mazes_never_cross_walls() {
    for seed in 0..16 {
        let grid = MazeGenerator::from_seed(seed)
            .generate(40, 30)
            .expect("positive dimensions");
        let start = grid.entrances()[0].0;
        let target = grid.center();

        let route = find_path(&grid, start, target);

        assert_valid_route(&grid, &route, start, target);
    }
}

#[test]
fn identical_start_and_target_yield_single_cell() {
    let grid = open_grid(3, 3);
    let cell = CellCoord::new(1, 2);

    assert_eq!(find_path(&grid, cell, cell), vec![cell]);
}

#[test]
fn out_of_bounds_endpoints_yield_empty_route() {
    let grid = open_grid(3, 3);

    assert!(find_path(&grid, CellCoord::new(3, 0), CellCoord::new(0, 0)).is_empty());
    assert!(find_path(&grid, CellCoord::new(0, 0), CellCoord::new(0, 3)).is_empty());
}

#[test]
fn walled_off_target_yields_empty_route() {
    let grid = Grid::new(3, 3).expect("positive dimensions");

    assert!(find_path(&grid, CellCoord::new(0, 0), CellCoord::new(2, 2)).is_empty());
}

#[test]
fn expansion_order_fixes_the_route() {
    let grid = open_grid(3, 3);

    assert_eq!(
        find_path(&grid, CellCoord::new(0, 0), CellCoord::new(2, 2)),
        vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(2, 0),
            CellCoord::new(2, 1),
            CellCoord::new(2, 2),
        ]
    );
}

#[test]
fn depth_first_routes_are_not_always_shortest() {
    let grid = open_grid(3, 3);

    let route = find_path(&grid, CellCoord::new(0, 0), CellCoord::new(0, 2));

    assert_eq!(
        route,
        vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(2, 0),
            CellCoord::new(2, 1),
            CellCoord::new(2, 2),
            CellCoord::new(1, 2),
            CellCoord::new(0, 2),
        ]
    );
}

#[test]
fn reused_search_matches_fresh_search() {
    let grid = MazeGenerator::from_seed(77)
        .generate(20, 15)
        .expect("positive dimensions");
    let mut search = DepthFirstSearch::default();

    for (start, _) in grid.entrances() {
        assert_eq!(
            search.find(&grid, start, grid.center()),
            find_path(&grid, start, grid.center())
        );
    }
}

#[test]
fn planner_routes_evader_to_goal_and_pursuer_to_evader() {
    let grid = open_grid(3, 3);
    let goal = CellCoord::new(1, 1);
    let evader = CellCoord::new(0, 0);
    let pursuer = CellCoord::new(2, 2);
    let agents = [
        snapshot(AgentKind::Evader, evader),
        snapshot(AgentKind::Pursuer, pursuer),
    ];
    let mut planner = Planner::default();
    let mut commands = Vec::new();

    planner.handle(GameState::Running, &grid, goal, &agents, &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::SetAgentPath {
                agent: AgentKind::Evader,
                path: find_path(&grid, evader, goal),
            },
            Command::SetAgentPath {
                agent: AgentKind::Pursuer,
                path: find_path(&grid, pursuer, evader),
            },
        ]
    );
}

#[test]
fn planner_is_idle_unless_running() {
    let grid = open_grid(3, 3);
    let agents = [
        snapshot(AgentKind::Evader, CellCoord::new(0, 0)),
        snapshot(AgentKind::Pursuer, CellCoord::new(2, 2)),
    ];
    let mut planner = Planner::default();
    let mut commands = Vec::new();

    for state in [GameState::Stopped, GameState::Ended] {
        planner.handle(state, &grid, CellCoord::new(1, 1), &agents, &mut commands);
    }

    assert!(commands.is_empty());
}

#[test]
fn planner_emits_empty_route_when_target_is_unreachable() {
    let grid = Grid::new(3, 3).expect("positive dimensions");
    let agents = [
        snapshot(AgentKind::Evader, CellCoord::new(0, 0)),
        snapshot(AgentKind::Pursuer, CellCoord::new(2, 2)),
    ];
    let mut planner = Planner::default();
    let mut commands = Vec::new();

    planner.handle(
        GameState::Running,
        &grid,
        CellCoord::new(1, 1),
        &agents,
        &mut commands,
    );

    assert_eq!(commands.len(), 2);
    assert!(commands.iter().all(|command| matches!(
        command,
        Command::SetAgentPath { path, .. } if path.is_empty()
    )));
}
