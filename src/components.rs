// components.rs
use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;

pub type SnakeId = u32;
pub type FoodId = u64;

#[derive(Debug, Clone)]
pub struct Snake {
    pub id: SnakeId,
    pub position: Vec2,
    /// Radians, 0 points along +x, world y grows downwards.
    pub heading: f32,
    pub speed: f32,
    pub boost_speed: f32,
    /// Past head positions, newest first.
    pub segments: VecDeque<Vec2>,
    /// Growth target: the longest the trail may get.
    pub max_segments: usize,
    pub alive: bool,
    pub score: u32,
    pub color: Color,
    pub is_ai: bool,
    /// Weak reference into the food pool, resolved every tick.
    pub target: Option<FoodId>,
}

impl Snake {
    pub fn new(
        id: SnakeId,
        position: Vec2,
        speed: f32,
        boost_speed: f32,
        length: usize,
        color: Color,
        is_ai: bool,
    ) -> Self {
        Self {
            id,
            position,
            heading: 0.0,
            speed,
            boost_speed,
            segments: std::iter::repeat(position).take(length).collect(),
            max_segments: length,
            alive: true,
            score: 0,
            color,
            is_ai,
            target: None,
        }
    }

    pub fn head(&self) -> Vec2 {
        self.segments.front().copied().unwrap_or(self.position)
    }

    /// Adds the current position at the head and drops whatever no longer
    /// fits the growth target.
    pub fn push_trail(&mut self) {
        self.segments.push_front(self.position);
        self.segments.truncate(self.max_segments);
    }
}

#[derive(Debug, Clone)]
pub struct Food {
    pub id: FoodId,
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Fully saturated colour with a random hue.
pub fn random_hue<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::hsl(rng.random_range(0.0..360.0), 1.0, 0.5)
}

// Render and UI markers

/// Sprite spawned for the current frame only.
#[derive(Component)]
pub struct FrameShape;

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct FinalScoreText;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPanel {
    MainMenu,
    PauseMenu,
    GameOver,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct MenuButton(pub crate::resources::SessionCommand);
