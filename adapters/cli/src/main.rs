#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Chase experience.

mod config;
mod scene;
mod session;

use std::{
    path::PathBuf,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use maze_chase_core::GameConfig;
use maze_chase_rendering::{FrameSimulationBreakdown, Presentation, RenderingBackend};
use maze_chase_rendering_macroquad::MacroquadBackend;
use maze_chase_system_bootstrap::Bootstrap;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{ConfigFile, DisplayConfig},
    session::{run_headless, Session},
};

/// Cat-and-mouse chase through a procedurally generated maze.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version)]
struct CliArgs {
    /// TOML file providing `[game]` and `[display]` settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Width of the playing field in pixels.
    #[arg(long, value_name = "PIXELS")]
    canvas_width: Option<u32>,

    /// Height of the playing field in pixels.
    #[arg(long, value_name = "PIXELS")]
    canvas_height: Option<u32>,

    /// Side length of a maze cell in pixels.
    #[arg(long, value_name = "PIXELS")]
    cell_size: Option<u32>,

    /// Scale applied to both agents' speeds.
    #[arg(long, value_name = "FACTOR")]
    speed_multiplier: Option<f32>,

    /// Seed for maze generation, spawn selection, and speed jitter.
    #[arg(long)]
    seed: Option<u64>,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_name = "BOOL")]
    vsync: Option<bool>,

    /// Log frame timings once per second.
    #[arg(long)]
    show_fps: bool,

    /// Run the simulation without a window and log the outcome.
    #[arg(long)]
    headless: bool,

    /// Tick budget for headless runs.
    #[arg(long, value_name = "TICKS", default_value_t = 36_000)]
    max_ticks: u64,

    /// Log filter directives; falls back to `RUST_LOG`, then `info`.
    #[arg(long, value_name = "FILTER")]
    log_filter: Option<String>,
}

impl CliArgs {
    /// Loads the configuration file, if any, and applies command-line overrides.
    fn resolve(&self) -> Result<(GameConfig, DisplayConfig)> {
        let ConfigFile {
            mut game,
            mut display,
        } = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        if let Some(width) = self.canvas_width {
            game.canvas_width = width;
        }
        if let Some(height) = self.canvas_height {
            game.canvas_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            game.cell_size = cell_size;
        }
        if let Some(multiplier) = self.speed_multiplier {
            game.speed_multiplier = multiplier;
        }
        if let Some(vsync) = self.vsync {
            display.vsync = vsync;
        }
        display.show_fps |= self.show_fps;

        let _ = game.validate().context("invalid game configuration")?;
        Ok((game, display))
    }
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.log_filter.as_deref())?;

    let (game, display) = args.resolve()?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut session =
        Session::new(Bootstrap::new(game, seed)).context("failed to build the first maze")?;
    info!(seed = session.seed(), "{}", maze_chase_world::query::welcome_banner(session.world()));

    if args.headless {
        let report = run_headless(&mut session, args.max_ticks);
        match report.winner {
            Some(winner) => info!(?winner, ticks = report.ticks, "headless run finished"),
            None => info!(ticks = report.ticks, "headless run hit its tick budget"),
        }
        return Ok(());
    }

    let scene = scene::build_scene(session.world()).context("failed to describe the maze")?;
    let presentation = Presentation::new("Maze Chase", scene::CLEAR_COLOR, scene);

    MacroquadBackend::default()
        .with_vsync(display.vsync)
        .with_show_fps(display.show_fps)
        .run(presentation, move |dt, input, frame_scene| {
            let simulation_started = Instant::now();
            if session.handle_input(input) {
                match scene::maze_presentation(session.world()) {
                    Ok(maze) => frame_scene.maze = maze,
                    Err(error) => error!(%error, "failed to describe the new maze"),
                }
            }
            let pathfinding = session.step(dt);
            let simulation = simulation_started.elapsed();

            let population_started = Instant::now();
            scene::refresh_scene(session.world(), frame_scene);

            FrameSimulationBreakdown {
                simulation,
                pathfinding,
                scene_population: population_started.elapsed(),
            }
        })
}

fn init_tracing(directives: Option<&str>) -> Result<()> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter `{directives}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow!("failed to install log subscriber: {error}"))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}
