// resources.rs
use crate::components::{random_hue, Snake, SnakeId};
use crate::config::GameConfig;
use crate::systems::food::FoodPool;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Clamps into the closed rectangle; edges stop movement, they never wrap.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(Vec2::ZERO, self.size())
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(0.0..=self.width),
            rng.random_range(0.0..=self.height),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    Resume,
    TogglePause,
    Collide,
    Restart,
}

impl SessionState {
    /// Pure transition table. `None` means the command does not apply here.
    pub fn next(self, command: SessionCommand) -> Option<SessionState> {
        use SessionCommand as C;
        use SessionState as S;

        match (self, command) {
            (S::Menu, C::Start) => Some(S::Playing),
            (S::Playing, C::Pause | C::TogglePause) => Some(S::Paused),
            (S::Paused, C::Resume | C::TogglePause) => Some(S::Playing),
            (S::Playing, C::Collide) => Some(S::GameOver),
            (S::GameOver, C::Restart) => Some(S::Playing),
            _ => None,
        }
    }

    /// Whether entering the next state rebuilds every entity.
    fn recreates_world(self, command: SessionCommand) -> bool {
        matches!(
            (self, command),
            (SessionState::Menu, SessionCommand::Start)
                | (SessionState::GameOver, SessionCommand::Restart)
        )
    }
}

/// The whole game: one instance, owned by the app, handed to every system
/// that reads or advances it.
#[derive(Resource)]
pub struct Session {
    pub config: GameConfig,
    pub state: SessionState,
    pub world: WorldBounds,
    pub player: Snake,
    pub ai_snakes: Vec<Snake>,
    pub food: FoodPool,
    pub coins: u32,
    /// Window coordinates, origin top-left, y down.
    pub pointer: Vec2,
    pub boosting: bool,
    pub viewport: Vec2,
    /// World position of the viewport's top-left corner.
    pub camera: Vec2,
    pub rng: StdRng,
    next_snake_id: SnakeId,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let viewport = Vec2::new(config.window_width, config.window_height);
        let world = WorldBounds::new(config.world_width, config.world_height);
        let food = FoodPool::new(
            config.food_count,
            config.food_radius_min,
            config.food_radius_max,
        );

        let mut session = Self {
            state: SessionState::Menu,
            world,
            player: Snake::new(0, Vec2::ZERO, 0.0, 0.0, 1, Color::WHITE, false),
            ai_snakes: Vec::new(),
            food,
            coins: 0,
            pointer: viewport / 2.0,
            boosting: false,
            viewport,
            camera: Vec2::ZERO,
            rng,
            next_snake_id: 0,
            config,
        };
        session.reset();
        session
    }

    /// Recreates the player, AI snakes and food from scratch.
    pub fn reset(&mut self) {
        self.player = self.spawn_snake(false);
        let mut ai_snakes = Vec::with_capacity(self.config.ai_count);
        for _ in 0..self.config.ai_count {
            ai_snakes.push(self.spawn_snake(true));
        }
        self.ai_snakes = ai_snakes;

        self.food = FoodPool::new(
            self.config.food_count,
            self.config.food_radius_min,
            self.config.food_radius_max,
        );
        self.food.refill(self.world, &mut self.rng);

        self.coins = 0;
        self.boosting = false;
        self.update_camera();
    }

    /// Applies `command` if the current state allows it. Returns whether the
    /// state changed.
    pub fn apply(&mut self, command: SessionCommand) -> bool {
        let Some(next) = self.state.next(command) else {
            debug!("ignoring {:?} while {:?}", command, self.state);
            return false;
        };

        if self.state.recreates_world(command) {
            self.reset();
            info!(
                "session started with {} AI snakes and {} food",
                self.ai_snakes.len(),
                self.food.len()
            );
        }

        debug!("session {:?} -> {:?}", self.state, next);
        self.state = next;
        true
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn update_camera(&mut self) {
        self.camera = crate::systems::camera::camera_offset(self.player.position, self.viewport);
    }

    fn spawn_snake(&mut self, is_ai: bool) -> Snake {
        let id = self.next_snake_id;
        self.next_snake_id += 1;

        let position = self.world.random_point(&mut self.rng);
        let color = random_hue(&mut self.rng);
        Snake::new(
            id,
            position,
            self.config.base_speed,
            self.config.boost_speed,
            self.config.initial_segments,
            color,
            is_ai,
        )
    }
}

/// Run condition for the tick.
pub fn session_playing(session: Res<Session>) -> bool {
    session.is_playing()
}
