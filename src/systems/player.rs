use crate::components::FinalScoreText;
use crate::events::{PlayerDeathEvent, PlayerDeathReason};
use crate::systems::hud::final_score_text;
use bevy::prelude::*;

// System that reports a finished game and fills in the game-over panel
pub fn handle_player_death(
    mut death_events: EventReader<PlayerDeathEvent>,
    mut final_score: Query<&mut Text, With<FinalScoreText>>,
) {
    for event in death_events.read() {
        match event.reason {
            PlayerDeathReason::HitAiSnake(ai) => {
                info!(
                    "player hit AI snake {}: game over with score {} and {} coins",
                    ai, event.score, event.coins
                );
            }
        }

        for mut text in final_score.iter_mut() {
            text.0 = final_score_text(event.score);
        }
    }
}
