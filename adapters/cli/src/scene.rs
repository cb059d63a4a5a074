//! Converts world queries into rendering scenes.

use maze_chase_rendering::{
    AgentPresentation, Color, ControlPanelView, MazePresentation, OutcomePresentation,
    RenderingError, Scene,
};
use maze_chase_world::{query, World};

/// Background cleared behind the maze each frame.
pub(crate) const CLEAR_COLOR: Color = Color::from_rgb_u8(236, 240, 241);
const WALL_COLOR: Color = Color::from_rgb_u8(44, 62, 80);
const PANEL_WIDTH: f32 = 200.0;
const PANEL_BACKGROUND: Color = Color::from_rgb_u8(30, 39, 46);

/// Builds the full scene for a freshly created world.
pub(crate) fn build_scene(world: &World) -> Result<Scene, RenderingError> {
    let mut scene = Scene::new(
        maze_presentation(world)?,
        query::goal(world),
        Vec::new(),
        query::game_state(world),
        None,
        Some(ControlPanelView::new(PANEL_WIDTH, PANEL_BACKGROUND)),
    );
    refresh_scene(world, &mut scene);
    Ok(scene)
}

/// Derives the wall segments of the world's maze.
pub(crate) fn maze_presentation(world: &World) -> Result<MazePresentation, RenderingError> {
    let grid = query::grid(world);
    MazePresentation::from_cells(
        grid.columns(),
        grid.rows(),
        query::cell_size(world),
        WALL_COLOR,
        grid.cells().map(|cell| (cell.coord(), cell.walls())),
    )
}

/// Copies the parts of the world that change between frames into the scene.
pub(crate) fn refresh_scene(world: &World, scene: &mut Scene) {
    scene.goal = query::goal(world);
    scene.agents.clear();
    scene.agents.extend(
        query::agents(world)
            .into_iter()
            .map(|agent| AgentPresentation::new(agent.kind, agent.position)),
    );
    scene.game_state = query::game_state(world);
    scene.outcome = query::winner(world).map(OutcomePresentation::new);
}
