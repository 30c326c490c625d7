use crate::components::SnakeId;
use bevy::prelude::*;

// Sent on the tick the player dies; the session is already in GameOver.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayerDeathEvent {
    pub reason: PlayerDeathReason,
    pub score: u32,
    pub coins: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerDeathReason {
    HitAiSnake(SnakeId), // Player head came within reach of an AI head
}
