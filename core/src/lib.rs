use {
    bevy::prelude::*, enemies::EnemiesPlugin, game_manager::GameManagerPlugin,
    states::GameState, system_schedule::TickSchedule, tracking::TrackingPlugin,
};

mod systems;


pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (TickSchedule::Lifecycle, TickSchedule::Mirror).chain(),
        )
        .add_plugins((GameManagerPlugin, TrackingPlugin, EnemiesPlugin))
        .add_systems(Startup, (setup_camera, systems::spawn_player_ship))
        .add_systems(OnEnter(GameState::Ready), systems::start_round)
        .add_observer(systems::pick_enemy_on_game_start);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
