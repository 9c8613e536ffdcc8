use {
    bevy::prelude::*,
    enemy_events::RandomizeEnemySelection,
    game_events::{GameRequest, GameStart},
    tracking_components::TransformTracker,
    transform_data_assets::{QuaternionData, TransformData, Vector3Data},
};

#[derive(Component, Debug, Default)]
pub struct PlayerShip;

/// Spawns the player ship with a tracker mirroring its transform every tick.
pub fn spawn_player_ship(
    mut commands: Commands,
    mut transform_data: ResMut<Assets<TransformData>>,
    mut positions: ResMut<Assets<Vector3Data>>,
    mut rotations: ResMut<Assets<QuaternionData>>,
) {
    let data = TransformData::with_new_cells(&mut positions, &mut rotations);
    let handle = transform_data.add(data);

    info!("spawning player ship");
    commands.spawn((
        PlayerShip,
        Name::new("Player Ship"),
        TransformTracker::new(handle).continuous_track_on_start(),
    ));
}

/// Every time the game becomes ready, a new round starts right away.
pub fn start_round(mut commands: Commands) {
    info!("game ready, starting round");
    commands.trigger(GameRequest::StartGame);
}

pub fn pick_enemy_on_game_start(_: On<GameStart>, mut commands: Commands) {
    commands.trigger(RandomizeEnemySelection);
}
