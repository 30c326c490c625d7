use crate::components::{FrameShape, Snake};
use crate::resources::{Session, SessionState};
use crate::systems::camera::{on_screen, screen_to_render, world_to_screen};
use bevy::prelude::*;
use bevy::render::render_resource::Extent3d;
use std::f32::consts::FRAC_PI_4;

const EYE_SPREAD: f32 = 6.0;
const EYE_RADIUS: f32 = 3.0;
const PUPIL_RADIUS: f32 = 1.5;
const MINIMAP_DOT_RADIUS: f32 = 3.0;
const TEXTURE_SIZE: u32 = 64;
// Depth step between consecutive draws so later shapes cover earlier ones
const SHAPE_Z_STEP: f32 = 0.001;

/// One draw call, in screen space (origin top-left, y down).
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Disc {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// White centre fading out towards the rim.
    Glow { center: Vec2, radius: f32 },
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
}

/// Everything drawn for one frame, in painter order.
pub fn draw_frame(session: &Session) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let camera = session.camera;
    let viewport = session.viewport;

    for food in &session.food.items {
        let center = world_to_screen(food.position, camera);
        if !on_screen(center, food.radius, viewport) {
            continue;
        }
        shapes.push(Shape::Disc {
            center,
            radius: food.radius,
            color: food.color,
        });
        shapes.push(Shape::Glow {
            center,
            radius: food.radius,
        });
    }

    for ai in &session.ai_snakes {
        draw_snake(&mut shapes, ai, session);
    }
    if session.player.alive {
        draw_snake(&mut shapes, &session.player, session);
    }

    draw_minimap(&mut shapes, session);
    shapes
}

/// Trail from tail to head with the tail most transparent, then the eyes.
fn draw_snake(shapes: &mut Vec<Shape>, snake: &Snake, session: &Session) {
    let radius = session.config.segment_radius;
    let len = snake.segments.len() as f32;

    for (i, segment) in snake.segments.iter().enumerate().rev() {
        let center = world_to_screen(*segment, session.camera);
        if !on_screen(center, radius, session.viewport) {
            continue;
        }
        shapes.push(Shape::Disc {
            center,
            radius,
            color: snake.color.with_alpha(1.0 - i as f32 / len),
        });
    }

    let head = world_to_screen(snake.head(), session.camera);
    if !on_screen(head, radius, session.viewport) {
        return;
    }

    let offset = Vec2::from_angle(snake.heading + FRAC_PI_4) * EYE_SPREAD;
    for (eye_radius, color) in [(EYE_RADIUS, Color::WHITE), (PUPIL_RADIUS, Color::BLACK)] {
        for center in [head + offset, head - offset] {
            shapes.push(Shape::Disc {
                center,
                radius: eye_radius,
                color,
            });
        }
    }
}

/// Screen position of a world point on the minimap.
pub fn minimap_point(session: &Session, point: Vec2) -> Vec2 {
    let size = session.config.minimap_size;
    let margin = session.config.minimap_margin;
    let origin = Vec2::new(session.viewport.x - size - margin, margin);
    origin + point * (Vec2::splat(size) / session.world.size())
}

fn draw_minimap(shapes: &mut Vec<Shape>, session: &Session) {
    let size = session.config.minimap_size;
    let margin = session.config.minimap_margin;
    let min = Vec2::new(session.viewport.x - size - margin, margin);

    shapes.push(Shape::Rect {
        min,
        size: Vec2::splat(size),
        color: Color::srgba(0.0, 0.0, 0.0, 0.5),
    });
    for (edge_min, edge_size) in [
        (min, Vec2::new(size, 1.0)),
        (min + Vec2::new(0.0, size - 1.0), Vec2::new(size, 1.0)),
        (min, Vec2::new(1.0, size)),
        (min + Vec2::new(size - 1.0, 0.0), Vec2::new(1.0, size)),
    ] {
        shapes.push(Shape::Rect {
            min: edge_min,
            size: edge_size,
            color: Color::WHITE,
        });
    }

    shapes.push(Shape::Disc {
        center: minimap_point(session, session.player.position),
        radius: MINIMAP_DOT_RADIUS,
        color: Color::srgb(1.0, 0.0, 0.0),
    });
}

#[derive(Resource)]
pub struct ShapeTextures {
    pub disc: Handle<Image>,
    pub glow: Handle<Image>,
}

/// White RGBA square whose alpha is `falloff(d)`, `d` being the distance from
/// the centre in radii.
fn radial_image(falloff: impl Fn(f32) -> f32) -> Image {
    let half = TEXTURE_SIZE as f32 / 2.0;
    let mut data = Vec::with_capacity((TEXTURE_SIZE * TEXTURE_SIZE * 4) as usize);
    for y in 0..TEXTURE_SIZE {
        for x in 0..TEXTURE_SIZE {
            let d = Vec2::new(x as f32 + 0.5 - half, y as f32 + 0.5 - half).length() / half;
            let alpha = falloff(d).clamp(0.0, 1.0);
            data.extend_from_slice(&[255, 255, 255, (alpha * 255.0).round() as u8]);
        }
    }

    let mut image = Image::default();
    image.resize(Extent3d {
        width: TEXTURE_SIZE,
        height: TEXTURE_SIZE,
        depth_or_array_layers: 1,
    });
    image.data = data;
    image
}

pub fn setup_shape_textures(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let half = TEXTURE_SIZE as f32 / 2.0;
    // one texel of anti-aliasing at the rim
    let disc = images.add(radial_image(|d| (1.0 - d) * half));
    let glow = images.add(radial_image(|d| 1.0 - d));
    commands.insert_resource(ShapeTextures { disc, glow });
}

pub fn render_frame_system(
    mut commands: Commands,
    session: Res<Session>,
    textures: Res<ShapeTextures>,
    previous: Query<Entity, With<FrameShape>>,
) {
    // Paused and game-over frames stay on screen untouched
    if !session.is_changed() {
        return;
    }

    for entity in previous.iter() {
        commands.entity(entity).despawn();
    }

    if session.state == SessionState::Menu {
        return;
    }

    let viewport = session.viewport;
    for (i, shape) in draw_frame(&session).into_iter().enumerate() {
        let z = i as f32 * SHAPE_Z_STEP;
        let (sprite, center) = match shape {
            Shape::Disc {
                center,
                radius,
                color,
            } => (
                Sprite {
                    image: textures.disc.clone(),
                    color,
                    custom_size: Some(Vec2::splat(radius * 2.0)),
                    ..default()
                },
                center,
            ),
            Shape::Glow { center, radius } => (
                Sprite {
                    image: textures.glow.clone(),
                    custom_size: Some(Vec2::splat(radius * 2.0)),
                    ..default()
                },
                center,
            ),
            Shape::Rect { min, size, color } => (
                Sprite {
                    color,
                    custom_size: Some(size),
                    ..default()
                },
                min + size / 2.0,
            ),
        };

        commands.spawn((
            sprite,
            Transform::from_translation(screen_to_render(center, viewport).extend(z)),
            FrameShape,
        ));
    }
}
