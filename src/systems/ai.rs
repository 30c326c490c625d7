use crate::components::Snake;
use crate::systems::food::FoodPool;
use rand::Rng;

/// Points an AI snake at its food target. The target is re-rolled when there
/// is none, when it has been eaten since, or on a random `retarget_chance`.
/// With no food at all the heading is left as it was.
pub fn steer_ai<R: Rng + ?Sized>(
    snake: &mut Snake,
    food: &FoodPool,
    retarget_chance: f64,
    rng: &mut R,
) {
    if food.is_empty() {
        return;
    }

    let stale = snake.target.is_some_and(|id| food.get(id).is_none());
    if snake.target.is_none() || stale || rng.random_bool(retarget_chance) {
        snake.target = food.random_id(rng);
    }

    if let Some(target) = snake.target.and_then(|id| food.get(id)) {
        let delta = target.position - snake.position;
        snake.heading = delta.y.atan2(delta.x);
    }
}
