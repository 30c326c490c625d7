use crate::components::{FinalScoreText, HudText, MenuButton, OverlayPanel};
use crate::resources::{Session, SessionCommand, SessionState};
use bevy::prelude::*;

pub fn hud_text(session: &Session) -> String {
    let mut text = format!("Score: {}\nCoins: {}", session.player.score, session.coins);
    if session.boosting {
        text.push_str("\nBOOSTING!");
    }
    text
}

pub fn final_score_text(score: u32) -> String {
    format!("Your Score: {}", score)
}

impl OverlayPanel {
    /// The state in which this panel is shown.
    pub fn shown_in(self) -> SessionState {
        match self {
            OverlayPanel::MainMenu => SessionState::Menu,
            OverlayPanel::PauseMenu => SessionState::Paused,
            OverlayPanel::GameOver => SessionState::GameOver,
        }
    }
}

pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(12.0),
            ..default()
        },
        Visibility::Hidden,
        HudText,
    ));

    spawn_panel(&mut commands, OverlayPanel::MainMenu, "Slither", |panel| {
        spawn_button(panel, "Play", SessionCommand::Start);
    });
    spawn_panel(&mut commands, OverlayPanel::PauseMenu, "Paused", |panel| {
        spawn_button(panel, "Resume", SessionCommand::Resume);
    });
    spawn_panel(&mut commands, OverlayPanel::GameOver, "Game Over", |panel| {
        panel.spawn((
            Text::new(final_score_text(0)),
            TextFont {
                font_size: 28.0,
                ..default()
            },
            TextColor(Color::WHITE),
            FinalScoreText,
        ));
        spawn_button(panel, "Play again", SessionCommand::Restart);
    });
}

fn spawn_panel(
    commands: &mut Commands,
    kind: OverlayPanel,
    title: &str,
    contents: impl FnOnce(&mut ChildBuilder),
) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            Visibility::Hidden,
            kind,
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(title),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            contents(panel);
        });
}

fn spawn_button(parent: &mut ChildBuilder, label: &str, command: SessionCommand) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(24.0), Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(0.15, 0.55, 0.3)),
            MenuButton(command),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn update_hud_system(
    session: Res<Session>,
    mut hud: Query<(&mut Text, &mut Visibility), With<HudText>>,
) {
    if !session.is_changed() {
        return;
    }
    for (mut text, mut visibility) in hud.iter_mut() {
        text.0 = hud_text(&session);
        *visibility = if session.state == SessionState::Menu {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
    }
}

/// Shows exactly the panel that belongs to the current state.
pub fn sync_overlays_system(
    session: Res<Session>,
    mut panels: Query<(&OverlayPanel, &mut Visibility)>,
) {
    if !session.is_changed() {
        return;
    }
    for (panel, mut visibility) in panels.iter_mut() {
        let wanted = if panel.shown_in() == session.state {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}
