use {
    crate::{EnemyDataHandles, EnemyDataSettings},
    bevy::prelude::*,
    enemy_data_assets::{EnemyRosterDefinition, EnemyStatsTable},
    enemy_events::{EnemyDataApplied, RandomizeEnemySelection, SelectEnemy},
    enemy_resources::EnemyRoster,
};

pub fn load_enemy_data(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<EnemyDataSettings>,
) {
    info!(stats = %settings.stats_path, roster = %settings.roster_path, "loading enemy data");
    commands.insert_resource(EnemyDataHandles {
        stats: asset_server.load(settings.stats_path.clone()),
        roster: asset_server.load(settings.roster_path.clone()),
    });
}

/// Applies the roster definition and the stats table whenever either of them is
/// loaded or hot reloaded.
pub fn apply_enemy_data(
    mut commands: Commands,
    mut stats_events: MessageReader<AssetEvent<EnemyStatsTable>>,
    mut roster_events: MessageReader<AssetEvent<EnemyRosterDefinition>>,
    handles: Res<EnemyDataHandles>,
    tables: Res<Assets<EnemyStatsTable>>,
    definitions: Res<Assets<EnemyRosterDefinition>>,
    settings: Res<EnemyDataSettings>,
    mut roster: ResMut<EnemyRoster>,
) {
    let stats_changed = stats_events
        .read()
        .filter(|event| is_update_of(event, handles.stats.id()))
        .count()
        > 0;
    let roster_changed = roster_events
        .read()
        .filter(|event| is_update_of(event, handles.roster.id()))
        .count()
        > 0;

    if roster_changed && let Some(definition) = definitions.get(&handles.roster) {
        roster.set_entries(definition.entries.clone());
        info!(entries = roster.entries().len(), "enemy roster loaded");
    }

    if !stats_changed && !roster_changed {
        return;
    }
    let Some(table) = tables.get(&handles.stats) else {
        return;
    };

    match roster.initialize(table) {
        Ok(elements) => {
            info!(elements, "enemy stats applied");
            if settings.allow_debug {
                roster.log_current();
            }
            commands.trigger(EnemyDataApplied { elements });
        }
        Err(error) => error!(%error, "failed to initialize enemy data"),
    }
}

fn is_update_of<A: Asset>(event: &AssetEvent<A>, id: AssetId<A>) -> bool {
    match event {
        AssetEvent::Added { id: changed } | AssetEvent::Modified { id: changed } => *changed == id,
        _ => false,
    }
}

pub fn on_randomize_selection(
    _trigger: On<RandomizeEnemySelection>,
    mut roster: ResMut<EnemyRoster>,
    settings: Res<EnemyDataSettings>,
) {
    match roster.randomize_selection(&mut rand::rng()) {
        Ok(index) => {
            debug!(index, "randomized enemy selection");
            if settings.allow_debug {
                roster.log_current();
            }
        }
        Err(error) => error!(%error, "cannot randomize enemy selection"),
    }
}

pub fn on_select_enemy(
    trigger: On<SelectEnemy>,
    mut roster: ResMut<EnemyRoster>,
    settings: Res<EnemyDataSettings>,
) {
    let requested = trigger.event().index;
    match roster.set_selection(requested) {
        Ok(index) => {
            debug!(requested, index, "selected enemy");
            if settings.allow_debug {
                roster.log_current();
            }
        }
        Err(error) => error!(%error, requested, "cannot select enemy"),
    }
}
