use crate::components::MenuButton;
use crate::resources::{Session, SessionCommand, SessionState};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowFocused, WindowResized};

/// Command sent by Enter/Space in each state.
pub fn confirm_command(state: SessionState) -> Option<SessionCommand> {
    match state {
        SessionState::Menu => Some(SessionCommand::Start),
        SessionState::Paused => Some(SessionCommand::Resume),
        SessionState::GameOver => Some(SessionCommand::Restart),
        SessionState::Playing => None,
    }
}

pub fn pointer_input_system(
    mut cursor_events: EventReader<CursorMoved>,
    mut session: ResMut<Session>,
) {
    // Only the latest position matters for the next tick
    if let Some(event) = cursor_events.read().last() {
        session.pointer = event.position;
    }
}

pub fn boost_input_system(mouse: Res<ButtonInput<MouseButton>>, mut session: ResMut<Session>) {
    let held = mouse.pressed(MouseButton::Left);
    if session.boosting != held {
        session.boosting = held;
    }
}

pub fn session_keys_system(keys: Res<ButtonInput<KeyCode>>, mut session: ResMut<Session>) {
    if keys.just_pressed(KeyCode::Escape) && session.apply(SessionCommand::TogglePause) {
        info!("game {}", if session.is_playing() { "resumed" } else { "paused" });
    }

    if keys.any_just_pressed([KeyCode::Enter, KeyCode::Space]) {
        if let Some(command) = confirm_command(session.state) {
            session.apply(command);
        }
    }
}

/// Losing window focus pauses a running game.
pub fn focus_pause_system(
    mut focus_events: EventReader<WindowFocused>,
    mut session: ResMut<Session>,
) {
    for event in focus_events.read() {
        if !event.focused && session.apply(SessionCommand::Pause) {
            info!("game paused: window lost focus");
        }
    }
}

pub fn menu_button_system(
    interactions: Query<(&Interaction, &MenuButton), (Changed<Interaction>, With<Button>)>,
    mut session: ResMut<Session>,
) {
    for (interaction, button) in interactions.iter() {
        if *interaction == Interaction::Pressed {
            session.apply(button.0);
        }
    }
}

pub fn window_resize_system(
    mut resize_events: EventReader<WindowResized>,
    mut session: ResMut<Session>,
) {
    for event in resize_events.read() {
        session.viewport = Vec2::new(event.width, event.height);
        session.update_camera();
        debug!("viewport resized to {}x{}", event.width, event.height);
    }
}

/// Picks up the real window size once at start-up.
pub fn sync_viewport(window: Query<&Window, With<PrimaryWindow>>, mut session: ResMut<Session>) {
    if let Ok(window) = window.get_single() {
        session.viewport = Vec2::new(window.width(), window.height());
        session.pointer = session.viewport / 2.0;
        session.update_camera();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::systems::camera::camera_offset;

    fn app_with_session() -> App {
        let mut app = App::new();
        app.insert_resource(Session::new(GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        }));
        app
    }

    #[test]
    fn test_confirm_command_per_state() {
        assert_eq!(confirm_command(SessionState::Menu), Some(SessionCommand::Start));
        assert_eq!(confirm_command(SessionState::Paused), Some(SessionCommand::Resume));
        assert_eq!(confirm_command(SessionState::GameOver), Some(SessionCommand::Restart));
        assert_eq!(confirm_command(SessionState::Playing), None);
    }

    #[test]
    fn test_escape_toggles_pause() {
        let mut app = app_with_session();
        app.init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, session_keys_system);
        app.world_mut()
            .resource_mut::<Session>()
            .apply(SessionCommand::Start);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        assert_eq!(app.world().resource::<Session>().state, SessionState::Paused);

        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(KeyCode::Escape);
        keys.clear();
        keys.press(KeyCode::Escape);
        app.update();
        assert_eq!(app.world().resource::<Session>().state, SessionState::Playing);
    }

    #[test]
    fn test_escape_in_menu_does_nothing() {
        let mut app = app_with_session();
        app.init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, session_keys_system);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        assert_eq!(app.world().resource::<Session>().state, SessionState::Menu);
    }

    #[test]
    fn test_focus_loss_pauses_only_running_game() {
        let mut app = app_with_session();
        app.add_event::<WindowFocused>()
            .add_systems(Update, focus_pause_system);
        let window = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(WindowFocused {
            window,
            focused: false,
        });
        app.update();
        assert_eq!(app.world().resource::<Session>().state, SessionState::Menu);

        app.world_mut()
            .resource_mut::<Session>()
            .apply(SessionCommand::Start);
        app.world_mut().send_event(WindowFocused {
            window,
            focused: false,
        });
        app.update();
        assert_eq!(app.world().resource::<Session>().state, SessionState::Paused);
    }

    #[test]
    fn test_mouse_button_sets_boost() {
        let mut app = app_with_session();
        app.init_resource::<ButtonInput<MouseButton>>()
            .add_systems(Update, boost_input_system);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        assert!(app.world().resource::<Session>().boosting);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        app.update();
        assert!(!app.world().resource::<Session>().boosting);
    }

    #[test]
    fn test_resize_updates_viewport_and_camera() {
        let mut app = app_with_session();
        app.add_event::<WindowResized>()
            .add_systems(Update, window_resize_system);
        let window = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(WindowResized {
            window,
            width: 1000.0,
            height: 500.0,
        });
        app.update();

        let session = app.world().resource::<Session>();
        assert_eq!(session.viewport, Vec2::new(1000.0, 500.0));
        assert_eq!(
            session.camera,
            camera_offset(session.player.position, Vec2::new(1000.0, 500.0))
        );
    }

    #[test]
    fn test_pointer_keeps_last_cursor_position() {
        let mut app = app_with_session();
        app.add_event::<CursorMoved>()
            .add_systems(Update, pointer_input_system);
        let window = app.world_mut().spawn_empty().id();

        for position in [Vec2::new(10.0, 20.0), Vec2::new(300.0, 40.0)] {
            app.world_mut().send_event(CursorMoved {
                window,
                position,
                delta: None,
            });
        }
        app.update();
        assert_eq!(app.world().resource::<Session>().pointer, Vec2::new(300.0, 40.0));

        // no movement leaves the pointer where it was
        app.update();
        assert_eq!(app.world().resource::<Session>().pointer, Vec2::new(300.0, 40.0));
    }

    #[test]
    fn test_pressed_menu_button_applies_its_command() {
        let mut app = app_with_session();
        app.add_systems(Update, menu_button_system);
        app.world_mut().spawn((
            Button,
            Interaction::Hovered,
            MenuButton(SessionCommand::Pause),
        ));
        let start = app
            .world_mut()
            .spawn((Button, Interaction::None, MenuButton(SessionCommand::Start)))
            .id();

        app.update();
        assert_eq!(app.world().resource::<Session>().state, SessionState::Menu);

        app.world_mut()
            .entity_mut(start)
            .insert(Interaction::Pressed);
        app.update();
        assert_eq!(app.world().resource::<Session>().state, SessionState::Playing);
    }
}
