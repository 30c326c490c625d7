use bevy::prelude::*;

/// World position shown at the viewport's top-left corner: the player sits
/// in the middle of the screen.
pub fn camera_offset(player: Vec2, viewport: Vec2) -> Vec2 {
    player - viewport / 2.0
}

pub fn world_to_screen(point: Vec2, camera: Vec2) -> Vec2 {
    point - camera
}

/// Screen space has its origin top-left with y down; the 2D camera sits at
/// the window centre with y up.
pub fn screen_to_render(point: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(point.x - viewport.x / 2.0, viewport.y / 2.0 - point.y)
}

/// Trivial bounding test used to skip off-screen draws.
pub fn on_screen(point: Vec2, margin: f32, viewport: Vec2) -> bool {
    point.x >= -margin
        && point.y >= -margin
        && point.x <= viewport.x + margin
        && point.y <= viewport.y + margin
}
