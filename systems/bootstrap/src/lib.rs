#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Maze Chase session.

use maze_chase_core::{CellCoord, ConfigError, GameConfig, SpeedJitter};
use maze_chase_system_maze_generation::MazeGenerator;
use maze_chase_world::{query, AgentSetup, Grid, GridError, World, WorldError, WorldSetup};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::info;

/// Golden-ratio increment used to step from one session seed to the next.
const SEED_STEP: u64 = 0x9e37_79b9_7f4a_7c15;

/// Turns a configuration and a seed into a freshly generated world.
#[derive(Clone, Debug, PartialEq)]
pub struct Bootstrap {
    config: GameConfig,
    seed: u64,
}

impl Bootstrap {
    /// Creates a bootstrap for the provided configuration and seed.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self { config, seed }
    }

    /// Configuration every world is built from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed driving maze carving, spawn selection, and speed jitter.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Bootstrap for the next session, with a seed derived from this one.
    #[must_use]
    pub fn reseeded(&self) -> Self {
        Self {
            config: self.config.clone(),
            seed: self.seed.wrapping_add(SEED_STEP),
        }
    }

    /// Builds a stopped world: carves the maze, places both agents, and rolls
    /// the pursuer's speed.
    pub fn build_world(&self) -> Result<World, BootstrapError> {
        let dimensions = self.config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let grid = MazeGenerator::new(&mut rng).generate(dimensions.columns, dimensions.rows)?;
        let goal = grid.center();
        let (evader_cell, pursuer_cell) = self.spawn_cells(&grid, &mut rng);

        let multiplier = self.config.speed_multiplier;
        let evader_speed = self.config.evader_speed * multiplier;
        let pursuer_speed = (self.config.pursuer_speed
            + sample_jitter(self.config.pursuer_speed_jitter, &mut rng))
            * multiplier;

        info!(
            seed = self.seed,
            columns = dimensions.columns,
            rows = dimensions.rows,
            evader = ?evader_cell,
            pursuer = ?pursuer_cell,
            evader_speed,
            pursuer_speed,
            "session prepared"
        );

        let world = World::new(
            grid,
            WorldSetup {
                cell_size: self.config.cell_size as f32,
                goal,
                evader: AgentSetup {
                    cell: evader_cell,
                    speed: evader_speed,
                },
                pursuer: AgentSetup {
                    cell: pursuer_cell,
                    speed: pursuer_speed,
                },
            },
        )?;
        Ok(world)
    }

    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    // Configured starts win; otherwise each agent takes a random entrance that
    // avoids the other agent's cell.
    fn spawn_cells(&self, grid: &Grid, rng: &mut impl Rng) -> (CellCoord, CellCoord) {
        let entrances = grid.entrances().map(|(cell, _)| cell);

        let evader = self
            .config
            .evader_start
            .unwrap_or_else(|| pick_entrance(&entrances, self.config.pursuer_start, rng));
        let pursuer = self
            .config
            .pursuer_start
            .unwrap_or_else(|| pick_entrance(&entrances, Some(evader), rng));

        (evader, pursuer)
    }
}

fn pick_entrance(
    entrances: &[CellCoord; 4],
    avoid: Option<CellCoord>,
    rng: &mut impl Rng,
) -> CellCoord {
    let candidates: Vec<CellCoord> = entrances
        .iter()
        .copied()
        .filter(|cell| Some(*cell) != avoid)
        .collect();

    candidates.choose(rng).copied().unwrap_or(entrances[0])
}

fn sample_jitter(jitter: SpeedJitter, rng: &mut impl Rng) -> f32 {
    if jitter.max > jitter.min {
        rng.gen_range(jitter.min..jitter.max)
    } else {
        jitter.min
    }
}

/// Errors raised while preparing a session.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BootstrapError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The maze grid could not be allocated.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The world rejected the derived setup.
    #[error(transparent)]
    World(#[from] WorldError),
}
