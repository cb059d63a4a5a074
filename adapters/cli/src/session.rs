//! Frame-by-frame driver that wires the planner and the world together.

use std::time::{Duration, Instant};

use maze_chase_core::{AgentKind, Command, Event, GameState};
use maze_chase_rendering::FrameInput;
use maze_chase_system_bootstrap::{Bootstrap, BootstrapError};
use maze_chase_system_pathfinding::Planner;
use maze_chase_world::{apply, query, World};
use tracing::{error, info};

/// Fixed step used when no window paces the simulation.
pub(crate) const HEADLESS_TICK: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Owns the current world and everything needed to rebuild it.
#[derive(Debug)]
pub(crate) struct Session {
    bootstrap: Bootstrap,
    world: World,
    planner: Planner,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Session {
    /// Builds the first world from the bootstrap.
    pub(crate) fn new(bootstrap: Bootstrap) -> Result<Self, BootstrapError> {
        let world = bootstrap.build_world()?;
        Ok(Self {
            bootstrap,
            world,
            planner: Planner::default(),
            commands: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Current world.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Seed of the current world.
    pub(crate) fn seed(&self) -> u64 {
        self.bootstrap.seed()
    }

    /// Applies the frame's control input. Returns `true` when a new maze replaced the old one.
    pub(crate) fn handle_input(&mut self, input: FrameInput) -> bool {
        let mut replaced = false;
        if input.reset {
            match self.reset() {
                Ok(()) => replaced = true,
                Err(error) => error!(%error, "failed to rebuild the maze"),
            }
        }
        if input.start {
            self.submit(Command::Start);
        }
        if input.stop {
            self.submit(Command::Stop);
        }
        replaced
    }

    /// Discards the world and builds a new one from a derived seed.
    pub(crate) fn reset(&mut self) -> Result<(), BootstrapError> {
        let bootstrap = self.bootstrap.reseeded();
        self.world = bootstrap.build_world()?;
        self.bootstrap = bootstrap;
        info!(seed = self.bootstrap.seed(), "maze reset");
        Ok(())
    }

    /// Re-plans both agents and advances the world by `dt`.
    ///
    /// Returns the time spent planning routes.
    pub(crate) fn step(&mut self, dt: Duration) -> Duration {
        let planning_started = Instant::now();
        self.planner.handle(
            query::game_state(&self.world),
            query::grid(&self.world),
            query::goal(&self.world),
            &query::agents(&self.world),
            &mut self.commands,
        );
        let pathfinding = planning_started.elapsed();

        self.commands.push(Command::Tick { dt });
        for command in self.commands.drain(..) {
            apply(&mut self.world, command, &mut self.events);
        }
        self.report_events();

        pathfinding
    }

    fn submit(&mut self, command: Command) {
        apply(&mut self.world, command, &mut self.events);
        self.report_events();
    }

    fn report_events(&mut self) {
        for event in self.events.drain(..) {
            if let Event::GameWon { winner } = event {
                info!(?winner, ticks = query::tick_index(&self.world), "game over");
            }
        }
    }
}

/// Outcome of a headless run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct HeadlessReport {
    /// Ticks simulated before the run stopped.
    pub ticks: u64,
    /// Winner, when the game ended within the tick budget.
    pub winner: Option<AgentKind>,
}

/// Starts the session and steps it at a fixed 60 Hz until it ends or
/// `max_ticks` elapse.
pub(crate) fn run_headless(session: &mut Session, max_ticks: u64) -> HeadlessReport {
    let _ = session.handle_input(FrameInput {
        start: true,
        ..FrameInput::default()
    });

    while query::game_state(session.world()) == GameState::Running
        && query::tick_index(session.world()) < max_ticks
    {
        let _ = session.step(HEADLESS_TICK);
    }

    HeadlessReport {
        ticks: query::tick_index(session.world()),
        winner: query::winner(session.world()),
    }
}

#[cfg(test)]
mod tests {
    use maze_chase_core::{CellCoord, GameConfig};

    use super::*;

    fn config() -> GameConfig {
        GameConfig {
            canvas_width: 200,
            canvas_height: 200,
            ..GameConfig::default()
        }
    }

    fn session(config: GameConfig, seed: u64) -> Session {
        Session::new(Bootstrap::new(config, seed)).expect("valid configuration")
    }

    #[test]
    fn steps_are_ignored_until_started() {
        let mut session = session(config(), 4);
        let before = query::agents(session.world());

        let _ = session.step(HEADLESS_TICK);

        assert_eq!(query::agents(session.world()), before);
        assert_eq!(query::tick_index(session.world()), 0);
    }

    #[test]
    fn start_and_stop_inputs_drive_the_state() {
        let mut session = session(config(), 4);

        let _ = session.handle_input(FrameInput {
            start: true,
            ..FrameInput::default()
        });
        assert_eq!(query::game_state(session.world()), GameState::Running);

        let _ = session.step(HEADLESS_TICK);
        assert_eq!(query::tick_index(session.world()), 1);

        let _ = session.handle_input(FrameInput {
            stop: true,
            ..FrameInput::default()
        });
        assert_eq!(query::game_state(session.world()), GameState::Stopped);
    }

    #[test]
    fn reset_builds_a_stopped_world_from_a_new_seed() {
        let mut session = session(config(), 4);
        let original_seed = session.seed();
        let _ = session.handle_input(FrameInput {
            start: true,
            ..FrameInput::default()
        });

        let replaced = session.handle_input(FrameInput {
            reset: true,
            ..FrameInput::default()
        });

        assert!(replaced);
        assert_ne!(session.seed(), original_seed);
        assert_eq!(query::game_state(session.world()), GameState::Stopped);
        assert_eq!(query::tick_index(session.world()), 0);
    }

    #[test]
    fn evader_next_to_goal_wins_quickly() {
        let config = GameConfig {
            evader_start: Some(CellCoord::new(4, 5)),
            pursuer_start: Some(CellCoord::new(0, 0)),
            ..config()
        };
        let mut session = session(config, 11);

        let report = run_headless(&mut session, 600);

        assert_eq!(report.winner, Some(AgentKind::Evader));
        assert!(report.ticks <= 61, "took {} ticks", report.ticks);
    }

    #[test]
    fn pursuer_sharing_the_evader_cell_wins_immediately() {
        let config = GameConfig {
            evader_start: Some(CellCoord::new(0, 0)),
            pursuer_start: Some(CellCoord::new(0, 0)),
            ..config()
        };
        let mut session = session(config, 11);

        let report = run_headless(&mut session, 600);

        assert_eq!(
            report,
            HeadlessReport {
                ticks: 1,
                winner: Some(AgentKind::Pursuer)
            }
        );
    }

    #[test]
    fn headless_runs_are_reproducible() {
        let first = run_headless(&mut session(config(), 21), 36_000);
        let second = run_headless(&mut session(config(), 21), 36_000);

        assert!(first.winner.is_some(), "run ended without a winner: {first:?}");
        assert_eq!(first, second);
    }

    #[test]
    fn default_sessions_end_with_a_winner() {
        for seed in 0..16 {
            let report = run_headless(&mut session(GameConfig::default(), seed), 36_000);

            assert!(
                report.winner.is_some(),
                "seed {seed} hit the tick budget after {} ticks",
                report.ticks
            );
        }
    }

    #[test]
    fn tick_budget_bounds_headless_runs() {
        let report = run_headless(&mut session(config(), 21), 3);

        assert!(report.ticks <= 3);
    }
}
