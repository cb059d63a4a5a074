//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};
use maze_chase_core::GameState;

/// Outcome of rendering the control panel UI during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ControlPanelUiResult {
    /// Whether the Start button was pressed.
    pub start_pressed: bool,
    /// Whether the Stop button was pressed.
    pub stop_pressed: bool,
    /// Whether the Reset button was pressed.
    pub reset_pressed: bool,
}

/// Snapshot of the control panel's UI layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ControlPanelUiContext {
    /// Top-left corner of the panel in screen coordinates.
    pub origin: Vec2,
    /// Panel dimensions in screen space.
    pub size: Vec2,
    /// Background colour applied to the window skin so the UI matches the
    /// adapter's solid rectangle.
    pub background: Color,
    /// Lifecycle state, displayed as a status label.
    pub game_state: GameState,
}

/// Renders the Start, Stop, and Reset buttons for the current frame.
pub(crate) fn draw_control_panel_ui(
    ui: &mut Ui,
    context: ControlPanelUiContext,
) -> ControlPanelUiResult {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    skin.window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .margin(RectOffset::new(16.0, 16.0, 16.0, 16.0))
        .build();

    skin.label_style = ui
        .style_builder()
        .text_color(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();

    skin.button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(52, 73, 94, 255))
        .color_hovered(Color::from_rgba(72, 101, 129, 255))
        .color_clicked(Color::from_rgba(44, 62, 80, 255))
        .margin(RectOffset::new(0.0, 0.0, 8.0, 8.0))
        .build();

    ui.push_skin(&skin);

    let mut result = ControlPanelUiResult::default();
    let _ = ui.window(hash!("control_panel"), context.origin, context.size, |ui| {
        ui.label(None, status_label(context.game_state));
        ui.label(None, "S start, P pause, R new maze");

        result.start_pressed = ui.button(None, "Start");
        result.stop_pressed = ui.button(None, "Stop");
        result.reset_pressed = ui.button(None, "Reset");
    });

    ui.pop_skin();

    result
}

fn status_label(state: GameState) -> &'static str {
    match state {
        GameState::Stopped => "Status: Stopped",
        GameState::Running => "Status: Running",
        GameState::Ended => "Status: Game over",
    }
}
