// In src/systems/movement.rs
use crate::components::Snake;
use crate::events::{PlayerDeathEvent, PlayerDeathReason};
use crate::resources::{Session, SessionCommand, WorldBounds};
use crate::systems::ai::steer_ai;
use crate::systems::collision::detect_player_hit;
use crate::systems::food::FoodPool;
use bevy::prelude::*;
use rand::Rng;

/// Heading from the screen centre towards the pointer.
pub fn pointer_heading(pointer: Vec2, viewport: Vec2) -> f32 {
    let delta = pointer - viewport / 2.0;
    delta.y.atan2(delta.x)
}

/// Moves one step along the heading, clamps to the world, records the trail.
pub fn advance_snake(snake: &mut Snake, boosting: bool, bounds: WorldBounds) {
    let speed = if boosting && !snake.is_ai && snake.alive {
        snake.boost_speed
    } else {
        snake.speed
    };

    let next = snake.position + Vec2::from_angle(snake.heading) * speed;
    snake.position = bounds.clamp(next);
    debug_assert!(bounds.contains(snake.position));
    snake.push_trail();
}

/// Eats whatever the head reaches, grows and scores the snake, then tops the
/// pool back up. Returns the number of pellets eaten.
pub fn feed_snake<R: Rng + ?Sized>(
    snake: &mut Snake,
    food: &mut FoodPool,
    rng: &mut R,
    bounds: WorldBounds,
    consume_radius: f32,
    growth_per_food: usize,
    score_per_food: u32,
) -> u32 {
    let eaten = food.consume_near(snake.position, consume_radius);
    snake.max_segments += growth_per_food * eaten;
    snake.score += score_per_food * eaten as u32;
    food.refill(bounds, rng);
    eaten as u32
}

/// One tick of the game: player first, then each AI snake, then the
/// player-vs-AI check. On a hit the session is already in GameOver when this
/// returns.
pub fn update_step(session: &mut Session) -> Option<PlayerDeathEvent> {
    let Session {
        config,
        world,
        player,
        ai_snakes,
        food,
        coins,
        pointer,
        boosting,
        viewport,
        rng,
        ..
    } = session;
    let bounds = *world;

    player.heading = pointer_heading(*pointer, *viewport);
    advance_snake(player, *boosting, bounds);
    *coins += feed_snake(
        player,
        food,
        rng,
        bounds,
        config.consume_radius,
        config.growth_per_food,
        config.score_per_food,
    );

    for ai in ai_snakes.iter_mut() {
        steer_ai(ai, food, config.retarget_chance, rng);
        advance_snake(ai, false, bounds);
        // only the player earns coins
        let _ = feed_snake(
            ai,
            food,
            rng,
            bounds,
            config.consume_radius,
            config.growth_per_food,
            config.score_per_food,
        );
    }

    let hit = detect_player_hit(player, ai_snakes, config.collision_threshold)?;
    player.alive = false;
    let event = PlayerDeathEvent {
        reason: PlayerDeathReason::HitAiSnake(hit),
        score: player.score,
        coins: *coins,
    };
    session.apply(SessionCommand::Collide);
    Some(event)
}

pub fn session_tick_system(
    mut session: ResMut<Session>,
    mut death_events: EventWriter<PlayerDeathEvent>,
) {
    if let Some(event) = update_step(&mut session) {
        death_events.send(event);
    }
    session.update_camera();
}
