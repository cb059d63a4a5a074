use std::collections::VecDeque;

use maze_chase_core::{CellCoord, Direction, Walls};
use maze_chase_system_maze_generation::MazeGenerator;
use maze_chase_world::{Grid, GridError};

const SIZES: [(u32, u32); 6] = [(1, 1), (3, 3), (5, 5), (7, 12), (12, 7), (40, 30)];
const SEEDS: [u64; 6] = [0, 1, 2, 0x42f0_e1eb_d4a5_3c21, 0xdead_beef, u64::MAX];

fn reachable_cells(grid: &Grid, origin: CellCoord) -> usize {
    let mut seen = vec![false; grid.len()];
    let mut queue = VecDeque::from([origin]);
    seen[grid.index(origin).expect("origin inside grid")] = true;
    let mut count = 0;

    while let Some(cell) = queue.pop_front() {
        count += 1;
        for direction in Direction::ALL {
            let Some(next) = grid.open_neighbor(cell, direction) else {
                continue;
            };
            let index = grid.index(next).expect("neighbour inside grid");
            if !seen[index] {
                seen[index] = true;
                queue.push_back(next);
            }
        }
    }

    count
}

fn internal_passages(grid: &Grid) -> usize {
    grid.cells()
        .map(|cell| {
            [Direction::East, Direction::South]
                .into_iter()
                .filter(|direction| grid.open_neighbor(cell.coord(), *direction).is_some())
                .count()
        })
        .sum()
}

fn assert_symmetric(grid: &Grid) {
    for cell in grid.cells() {
        for direction in Direction::ALL {
            let Some(neighbor) = grid.neighbor(cell.coord(), direction) else {
                continue;
            };
            assert_eq!(
                grid.is_blocked(cell.coord(), direction),
                grid.is_blocked(neighbor, direction.opposite()),
                "asymmetric wall between {:?} and {:?}",
                cell.coord(),
                neighbor
            );
        }
    }
}

#[test]
fn generated_mazes_are_fully_connected() {
    for (columns, rows) in SIZES {
        for seed in SEEDS {
            let grid = MazeGenerator::from_seed(seed)
                .generate(columns, rows)
                .expect("positive dimensions");

            assert_eq!(
                reachable_cells(&grid, CellCoord::new(0, 0)),
                grid.len(),
                "{columns}x{rows} maze with seed {seed} is disconnected"
            );
        }
    }
}

#[test]
fn walls_stay_symmetric_after_post_processing() {
    for (columns, rows) in SIZES {
        for seed in SEEDS {
            let grid = MazeGenerator::from_seed(seed)
                .generate(columns, rows)
                .expect("positive dimensions");
            assert_symmetric(&grid);
        }
    }
}

#[test]
fn carving_alone_yields_a_spanning_tree() {
    for (columns, rows) in SIZES {
        let grid = MazeGenerator::from_seed(11)
            .carve_spanning_tree(columns, rows)
            .expect("positive dimensions");

        assert!(grid.cells().all(|cell| cell.visited()));
        assert_eq!(internal_passages(&grid), grid.len() - 1);
        assert_eq!(reachable_cells(&grid, CellCoord::new(0, 0)), grid.len());
        assert_symmetric(&grid);
    }
}

#[test]
fn entrances_open_onto_the_outside() {
    let grid = MazeGenerator::from_seed(3)
        .generate(40, 30)
        .expect("positive dimensions");

    for (cell, direction) in grid.entrances() {
        assert!(
            !grid.is_blocked(cell, direction),
            "entrance {cell:?} is still walled"
        );
    }
    assert!(grid.is_blocked(CellCoord::new(0, 0), Direction::North));
    assert!(grid.is_blocked(CellCoord::new(0, 0), Direction::West));
}

#[test]
fn center_block_is_cleared() {
    let grid = MazeGenerator::from_seed(5)
        .generate(40, 30)
        .expect("positive dimensions");
    let center = grid.center();

    for row in center.row() - 1..=center.row() + 1 {
        for column in center.column() - 1..=center.column() + 1 {
            assert_eq!(grid.walls(CellCoord::new(column, row)), Some(Walls::open()));
        }
    }
}

#[test]
fn post_processing_adds_passages_beyond_the_tree() {
    let tree = MazeGenerator::from_seed(9)
        .carve_spanning_tree(40, 30)
        .expect("positive dimensions");
    let maze = MazeGenerator::from_seed(9)
        .generate(40, 30)
        .expect("positive dimensions");

    assert!(internal_passages(&maze) > internal_passages(&tree));
}

#[test]
fn same_seed_reproduces_the_same_maze() {
    let first = MazeGenerator::from_seed(0x1234_5678)
        .generate(40, 30)
        .expect("positive dimensions");
    let second = MazeGenerator::from_seed(0x1234_5678)
        .generate(40, 30)
        .expect("positive dimensions");
    let other = MazeGenerator::from_seed(0x8765_4321)
        .generate(40, 30)
        .expect("positive dimensions");

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn zero_sized_mazes_are_rejected() {
    let error = MazeGenerator::from_seed(1)
        .generate(0, 4)
        .expect_err("zero columns must fail");

    assert_eq!(error, GridError::EmptyDimensions { columns: 0, rows: 4 });
}
