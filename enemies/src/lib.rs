pub mod systems;


use {
    bevy::prelude::*,
    enemy_data_assets::{EnemyDataAssetsPlugin, EnemyRosterDefinition, EnemyStatsTable},
    enemy_resources::EnemyRoster,
};

pub struct EnemiesPlugin;

impl Plugin for EnemiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EnemyDataAssetsPlugin)
            .register_type::<EnemyDataSettings>()
            .register_type::<EnemyRoster>()
            .init_resource::<EnemyDataSettings>()
            .init_resource::<EnemyRoster>()
            .add_systems(Startup, systems::load_enemy_data)
            .add_systems(
                Update,
                systems::apply_enemy_data.run_if(resource_exists::<EnemyDataHandles>),
            )
            .add_observer(systems::on_randomize_selection)
            .add_observer(systems::on_select_enemy);
    }
}

#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource, Default)]
pub struct EnemyDataSettings {
    /// Asset path of the base stats table.
    pub stats_path: String,
    /// Asset path of the roster definition.
    pub roster_path: String,
    /// Logs the selected enemy's stats whenever they change.
    pub allow_debug: bool,
}

impl Default for EnemyDataSettings {
    fn default() -> Self {
        Self {
            stats_path: "game_data/enemies.enemy_data.json".into(),
            roster_path: "game_data/enemies.enemy_roster.ron".into(),
            allow_debug: false,
        }
    }
}

#[derive(Resource, Debug)]
pub struct EnemyDataHandles {
    pub stats: Handle<EnemyStatsTable>,
    pub roster: Handle<EnemyRosterDefinition>,
}
