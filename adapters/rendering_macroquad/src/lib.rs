#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Chase.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment, so the
//! dependency is declared without its default `audio` feature.
//!
//! All `macroquad::ui` calls live inside the local `ui` module to avoid leaking
//! Macroquad UI types throughout the renderer.

mod ui;

use self::ui::{draw_control_panel_ui, ControlPanelUiContext, ControlPanelUiResult};
use anyhow::Result;
use glam::Vec2;
use macroquad::{
    input::{is_key_pressed, KeyCode},
    math::Vec2 as MacroquadVec2,
};
use maze_chase_rendering::{
    AgentPresentation, Color, ControlPanelView, FrameInput, FrameSimulationBreakdown, Glyph,
    OutcomePresentation, Presentation, RenderingBackend, Scene,
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};
use tracing::info;

const WALL_THICKNESS: f32 = 2.0;
const GLYPH_RADIUS_RATIO: f32 = 0.35;
const LABEL_FONT_SIZE: u16 = 14;
const OUTCOME_FONT_SIZE: u16 = 48;

/// Tracks UI-sourced interactions so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPanelInputState {
    start_latched: bool,
    stop_latched: bool,
    reset_latched: bool,
}

impl ControlPanelInputState {
    /// Returns whether the Start button fired and clears the latch.
    pub fn take_start(&mut self) -> bool {
        std::mem::take(&mut self.start_latched)
    }

    /// Records a Start button press for the next frame.
    pub fn register_start(&mut self) {
        self.start_latched = true;
    }

    /// Returns whether the Stop button fired and clears the latch.
    pub fn take_stop(&mut self) -> bool {
        std::mem::take(&mut self.stop_latched)
    }

    /// Records a Stop button press for the next frame.
    pub fn register_stop(&mut self) {
        self.stop_latched = true;
    }

    /// Returns whether the Reset button fired and clears the latch.
    pub fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset_latched)
    }

    /// Records a Reset button press for the next frame.
    pub fn register_reset(&mut self) {
        self.reset_latched = true;
    }

    fn register(&mut self, result: ControlPanelUiResult) {
        if result.start_pressed {
            self.register_start();
        }
        if result.stop_pressed {
            self.register_stop();
        }
        if result.reset_pressed {
            self.register_reset();
        }
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Escape` quits the game loop.
    quit_requested: bool,
    /// `S` starts or resumes the chase.
    start: bool,
    /// `P` pauses the chase.
    stop: bool,
    /// `R` generates a new maze.
    reset: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape),
            start: is_key_pressed(KeyCode::S),
            stop: is_key_pressed(KeyCode::P),
            reset: is_key_pressed(KeyCode::R),
        }
    }
}

fn merge_frame_input(keyboard: KeyboardShortcuts, panel: &mut ControlPanelInputState) -> FrameInput {
    // Every latch is drained each frame so a button never fires twice.
    let start = panel.take_start();
    let stop = panel.take_stop();
    let reset = panel.take_reset();

    FrameInput {
        start: keyboard.start || start,
        stop: keyboard.stop || stop,
        reset: keyboard.reset || reset,
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        self.with_swap_interval(Some(i32::from(enabled)))
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Per-frame timings fed into the FPS counter.
#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    stages: FrameSimulationBreakdown,
    render: Duration,
}

/// Running totals of each stage between two reports.
#[derive(Clone, Copy, Debug, Default)]
struct StageTotals {
    simulation: Duration,
    pathfinding: Duration,
    scene_population: Duration,
    render: Duration,
}

impl StageTotals {
    fn add(&mut self, breakdown: FrameBreakdown) {
        self.simulation += breakdown.stages.simulation;
        self.pathfinding += breakdown.stages.pathfinding;
        self.scene_population += breakdown.stages.scene_population;
        self.render += breakdown.render;
    }

    fn average(self, frames: u32) -> Self {
        let frames = frames.max(1);
        Self {
            simulation: self.simulation / frames,
            pathfinding: self.pathfinding / frames,
            scene_population: self.scene_population / frames,
            render: self.render / frames,
        }
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    totals: StageTotals,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    averages: StageTotals,
}

impl FpsCounter {
    /// Records a rendered frame and, once a second has elapsed, returns the
    /// per-second and trailing ten-second averages.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.totals.add(breakdown);

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;
        while self.window_duration > Duration::from_secs(10) {
            let Some(removed) = self.frame_times.pop_front() else {
                break;
            };
            self.window_duration = self.window_duration.saturating_sub(removed);
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let averages = std::mem::take(&mut self.totals).average(self.frames);

        self.elapsed = Duration::ZERO;
        self.frames = 0;

        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
            averages,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameSimulationBreakdown + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let panel_width = scene
            .control_panel
            .map_or(0.0, |panel| panel.width.max(0.0));
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: (scene.maze.width() + panel_width).ceil() as i32,
            window_height: scene.maze.height().ceil() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut control_panel_input = ControlPanelInputState::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = merge_frame_input(keyboard, &mut control_panel_input);

                let stages = update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);

                let render_start = Instant::now();
                draw_maze(&scene, &metrics);
                draw_goal(&scene, &metrics);
                draw_agents(&scene.agents, &metrics);
                if let Some(outcome) = scene.outcome {
                    draw_outcome(outcome, &metrics);
                }
                if let Some(panel_context) = draw_control_panel(&scene, screen_width, screen_height)
                {
                    let mut control_panel_ui = macroquad::ui::root_ui();
                    let result = draw_control_panel_ui(&mut control_panel_ui, panel_context);
                    control_panel_input.register(result);
                }
                let render = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    stages,
                    render,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        averages,
                    }) = fps_metrics
                    {
                        info!(
                            fps = format_args!("{per_second:.2}"),
                            trailing = format_args!("{trailing_ten_seconds:.2}"),
                            simulation_ms = averages.simulation.as_secs_f64() * 1_000.0,
                            pathfinding_ms = averages.pathfinding.as_secs_f64() * 1_000.0,
                            scene_ms = averages.scene_population.as_secs_f64() * 1_000.0,
                            render_ms = averages.render.as_secs_f64() * 1_000.0,
                            "frame timings"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Mapping from maze pixels to screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    maze_width_scaled: f32,
    maze_height_scaled: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let maze_width = scene.maze.width();
        let maze_height = scene.maze.height();
        let panel_width = scene
            .control_panel
            .map_or(0.0, |panel| panel.width.max(0.0))
            .min(screen_width);
        let available_width = (screen_width - panel_width).max(0.0);

        let scale = if maze_width <= f32::EPSILON || maze_height <= f32::EPSILON {
            1.0
        } else {
            (available_width / maze_width).min(screen_height / maze_height)
        };

        let maze_width_scaled = maze_width * scale;
        let maze_height_scaled = maze_height * scale;

        Self {
            scale,
            offset_x: ((available_width - maze_width_scaled) * 0.5).max(0.0),
            offset_y: ((screen_height - maze_height_scaled) * 0.5).max(0.0),
            maze_width_scaled,
            maze_height_scaled,
            cell_step: scene.maze.cell_size * scale,
        }
    }

    fn to_screen(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + point.x * self.scale,
            self.offset_y + point.y * self.scale,
        )
    }

    fn glyph_radius(&self) -> f32 {
        self.cell_step * GLYPH_RADIUS_RATIO
    }
}

fn draw_maze(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(scene.maze.line_color);
    let thickness = (WALL_THICKNESS * metrics.scale).max(1.0);

    for wall in &scene.maze.walls {
        let from = metrics.to_screen(wall.from);
        let to = metrics.to_screen(wall.to);
        macroquad::shapes::draw_line(from.x, from.y, to.x, to.y, thickness, color);
    }
}

fn draw_goal(scene: &Scene, metrics: &SceneMetrics) {
    let center = metrics.to_screen(scene.maze.cell_center(scene.goal));
    draw_glyph(Glyph::Cheese, center, metrics.glyph_radius());
}

fn draw_agents(agents: &[AgentPresentation], metrics: &SceneMetrics) {
    let radius = metrics.glyph_radius();
    for agent in agents {
        draw_glyph(agent.glyph, metrics.to_screen(agent.position), radius);
    }
}

fn draw_glyph(glyph: Glyph, center: Vec2, radius: f32) {
    if radius <= f32::EPSILON {
        return;
    }

    macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(glyph.color()));

    let initial = &glyph.label()[..1];
    let dimensions = macroquad::text::measure_text(initial, None, LABEL_FONT_SIZE, 1.0);
    macroquad::text::draw_text(
        initial,
        center.x - dimensions.width * 0.5,
        center.y + dimensions.offset_y * 0.5,
        f32::from(LABEL_FONT_SIZE),
        macroquad::color::BLACK,
    );
}

fn outcome_layout(metrics: &SceneMetrics) -> (Vec2, Vec2) {
    let origin = Vec2::new(metrics.offset_x, metrics.offset_y);
    let size = Vec2::new(metrics.maze_width_scaled, metrics.maze_height_scaled);
    (origin, size)
}

fn draw_outcome(outcome: OutcomePresentation, metrics: &SceneMetrics) {
    let (origin, size) = outcome_layout(metrics);
    let shade = Color::from_rgb_u8(0, 0, 0).with_alpha(0.6);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        size.x,
        size.y,
        to_macroquad_color(shade),
    );

    let center = origin + size * 0.5;
    let radius = (size.y * 0.1).max(metrics.glyph_radius());
    draw_glyph(outcome.winner, center - Vec2::new(0.0, radius * 1.5), radius);

    let message = outcome.message();
    let dimensions = macroquad::text::measure_text(&message, None, OUTCOME_FONT_SIZE, 1.0);
    macroquad::text::draw_text(
        &message,
        center.x - dimensions.width * 0.5,
        center.y + dimensions.height,
        f32::from(OUTCOME_FONT_SIZE),
        macroquad::color::WHITE,
    );
}

fn draw_control_panel(
    scene: &Scene,
    screen_width: f32,
    screen_height: f32,
) -> Option<ControlPanelUiContext> {
    let ControlPanelView { width, background } = scene.control_panel?;
    if width <= f32::EPSILON {
        return None;
    }

    let left = (screen_width - width).max(0.0);
    let background_color = to_macroquad_color(background);
    macroquad::shapes::draw_rectangle(left, 0.0, width, screen_height, background_color);

    Some(ControlPanelUiContext {
        origin: MacroquadVec2::new(left, 0.0),
        size: MacroquadVec2::new(width, screen_height),
        background: background_color,
        game_state: scene.game_state,
    })
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
