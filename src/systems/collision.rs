use crate::components::{Snake, SnakeId};

/// First living AI snake whose head is closer than `threshold` to the
/// player's. AI snakes never collide with each other or die.
pub fn detect_player_hit(player: &Snake, ai_snakes: &[Snake], threshold: f32) -> Option<SnakeId> {
    ai_snakes
        .iter()
        .filter(|ai| ai.alive)
        .find(|ai| player.position.distance(ai.position) < threshold)
        .map(|ai| ai.id)
}
