pub mod ai;
pub mod camera;
pub mod collision;
pub mod food;
pub mod hud;
pub mod input;
pub mod movement;
pub mod player;
pub mod render;
