use crate::components::{random_hue, Food, FoodId};
use crate::resources::WorldBounds;
use bevy::prelude::*;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Flat list of pellets kept at a constant size.
#[derive(Debug, Clone)]
pub struct FoodPool {
    pub items: Vec<Food>,
    pub capacity: usize,
    radius_min: f32,
    radius_max: f32,
    next_id: FoodId,
}

impl FoodPool {
    pub fn new(capacity: usize, radius_min: f32, radius_max: f32) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            radius_min,
            radius_max,
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: FoodId) -> Option<&Food> {
        self.items.iter().find(|food| food.id == id)
    }

    pub fn random_id<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<FoodId> {
        self.items.choose(rng).map(|food| food.id)
    }

    /// Tops the pool up to `capacity` with freshly randomised pellets and
    /// returns how many were added.
    pub fn refill<R: Rng + ?Sized>(&mut self, bounds: WorldBounds, rng: &mut R) -> usize {
        let missing = self.capacity.saturating_sub(self.items.len());
        for _ in 0..missing {
            let food = self.spawn(bounds, rng);
            self.items.push(food);
        }
        missing
    }

    /// Removes every pellet whose edge is within `reach` of `position` and
    /// returns how many were eaten.
    pub fn consume_near(&mut self, position: Vec2, reach: f32) -> usize {
        let before = self.items.len();
        self.items
            .retain(|food| position.distance(food.position) >= food.radius + reach);
        before - self.items.len()
    }

    fn spawn<R: Rng + ?Sized>(&mut self, bounds: WorldBounds, rng: &mut R) -> Food {
        let id = self.next_id;
        self.next_id += 1;

        let radius = if self.radius_max > self.radius_min {
            rng.random_range(self.radius_min..self.radius_max)
        } else {
            self.radius_min
        };

        Food {
            id,
            position: bounds.random_point(rng),
            radius,
            color: random_hue(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> WorldBounds {
        WorldBounds::new(5000.0, 5000.0)
    }

    #[test]
    fn test_refill_reaches_capacity() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = FoodPool::new(300, 6.0, 10.0);
        assert_eq!(pool.refill(bounds(), &mut rng), 300);
        assert_eq!(pool.len(), 300);
        assert_eq!(pool.refill(bounds(), &mut rng), 0);

        for food in &pool.items {
            assert!(bounds().contains(food.position));
            assert!(food.radius >= 6.0 && food.radius < 10.0);
        }
    }

    #[test]
    fn test_consume_then_refill_keeps_pool_size() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut pool = FoodPool::new(300, 6.0, 10.0);
        pool.refill(bounds(), &mut rng);

        let target = pool.items[0].clone();
        let eaten = pool.consume_near(target.position, 10.0);
        assert!(eaten >= 1);
        assert!(pool.get(target.id).is_none());

        pool.refill(bounds(), &mut rng);
        assert_eq!(pool.len(), 300);
        // replacements never reuse an id
        assert!(pool.get(target.id).is_none());
    }

    #[test]
    fn test_consume_uses_radius_plus_reach() {
        let mut pool = FoodPool::new(1, 6.0, 6.0);
        pool.items.push(Food {
            id: 42,
            position: Vec2::new(100.0, 100.0),
            radius: 6.0,
            color: Color::WHITE,
        });

        assert_eq!(pool.consume_near(Vec2::new(116.0, 100.0), 10.0), 0);
        assert_eq!(pool.consume_near(Vec2::new(115.9, 100.0), 10.0), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_random_id_on_empty_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = FoodPool::new(0, 6.0, 10.0);
        assert_eq!(pool.random_id(&mut rng), None);
    }
}
