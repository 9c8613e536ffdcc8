use {
    bevy::prelude::*,
    bevy_common_assets::{json::JsonAssetPlugin, ron::RonAssetPlugin},
    serde::{Deserialize, Serialize},
    thiserror::Error,
};

pub struct EnemyDataAssetsPlugin;

impl Plugin for EnemyDataAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EnemyStats>()
            .register_type::<CreepData>()
            .register_type::<EnemyEntry>();

        // Base stats exported from the balancing sheet, one column per stat.
        app.add_plugins(JsonAssetPlugin::<EnemyStatsTable>::new(&["enemy_data.json"]));
        // Designer roster: which enemy types exist and their live stat blocks.
        app.add_plugins(RonAssetPlugin::<EnemyRosterDefinition>::new(&[
            "enemy_roster.ron",
        ]));
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnemyDataError {
    #[error("enemy roster is empty")]
    EmptyRoster,
    #[error("`{field}` has {found} values but the table declares {expected} elements")]
    TableTooShort {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Column oriented base stats, as written by the balancing export.
#[derive(Asset, TypePath, Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyStatsTable {
    pub elements: usize,
    pub enemy_healths: Vec<f32>,
    pub enemy_damages: Vec<f32>,
    pub enemy_speeds: Vec<f32>,
    pub enemy_bounties: Vec<i32>,
    pub enemy_scores: Vec<i32>,
}

impl EnemyStatsTable {
    /// Converts the columns into one stat block per element.
    ///
    /// Columns may be longer than `elements`; extra values are ignored.
    pub fn rows(&self) -> Result<Vec<EnemyStats>, EnemyDataError> {
        let expected = self.elements;
        let columns = [
            ("enemyHealths", self.enemy_healths.len()),
            ("enemyDamages", self.enemy_damages.len()),
            ("enemySpeeds", self.enemy_speeds.len()),
            ("enemyBounties", self.enemy_bounties.len()),
            ("enemyScores", self.enemy_scores.len()),
        ];
        if let Some((field, found)) = columns.into_iter().find(|(_, len)| *len < expected) {
            return Err(EnemyDataError::TableTooShort {
                field,
                expected,
                found,
            });
        }

        Ok((0..expected)
            .map(|i| EnemyStats {
                health: self.enemy_healths[i],
                damage: self.enemy_damages[i],
                speed: self.enemy_speeds[i],
                bounty: self.enemy_bounties[i],
                score: self.enemy_scores[i],
            })
            .collect())
    }
}

/// Base stats of one enemy type.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct EnemyStats {
    pub health: f32,
    pub damage: f32,
    pub speed: f32,
    pub bounty: i32,
    pub score: i32,
}

/// Live stats of an enemy type. Starts from the base stats and may be modified
/// during a run.
#[derive(Reflect, Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CreepData {
    pub unit_name: String,
    #[serde(default)]
    pub health: f32,
    #[serde(default)]
    pub damage: f32,
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub bounty: i32,
    #[serde(default)]
    pub score: i32,
}

impl CreepData {
    pub fn apply_base(&mut self, stats: &EnemyStats) {
        self.health = stats.health;
        self.damage = stats.damage;
        self.speed = stats.speed;
        self.bounty = stats.bounty;
        self.score = stats.score;
    }
}

#[derive(Reflect, Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EnemyEntry {
    /// Display name, derived from the creep data. See `EnemyRoster::refresh_names`.
    #[serde(default)]
    pub name: String,
    /// Prefab ids of the visual variants of this enemy type.
    #[serde(default)]
    pub prefab_variants: Vec<String>,
    #[serde(default)]
    pub creep: Option<CreepData>,
}

#[derive(Asset, TypePath, Debug, Clone, Default, Deserialize, Serialize)]
pub struct EnemyRosterDefinition {
    pub entries: Vec<EnemyEntry>,
}
