use bevy::log::LogPlugin;
use bevy::prelude::*;
mod components;
mod config;
mod events;
mod resources;
mod systems;

use config::GameConfig;
use events::PlayerDeathEvent;
use resources::*;
use systems::hud::*;
use systems::input::*;
use systems::movement::session_tick_system;
use systems::player::handle_player_death;
use systems::render::*;

fn main() {
    let config_path = config::config_path();
    let config = match GameConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("slitherio: {}", err);
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Slither".into(),
                        resolution: (config.window_width, config.window_height).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: config.log_filter.clone(),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(Color::srgb(0.06, 0.06, 0.09)))
        .insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
        .insert_resource(Session::new(config))
        .add_event::<PlayerDeathEvent>()
        .add_systems(
            Startup,
            (setup_game, sync_viewport, setup_hud, setup_shape_textures),
        )
        .add_systems(FixedUpdate, session_tick_system.run_if(session_playing))
        .add_systems(
            Update,
            (
                (
                    window_resize_system,
                    pointer_input_system,
                    boost_input_system,
                    session_keys_system,
                    focus_pause_system,
                    menu_button_system,
                ),
                handle_player_death,
                (render_frame_system, update_hud_system, sync_overlays_system),
            )
                .chain(),
        )
        .run();
}

fn setup_game(mut commands: Commands, session: Res<Session>) {
    // Spawn camera
    commands.spawn(Camera2d::default());

    let config = &session.config;
    info!(
        "world {}x{} with {} food and {} AI snakes, ticking at {} Hz",
        config.world_width, config.world_height, config.food_count, config.ai_count, config.tick_hz
    );
}
