use bevy::prelude::*;

/// Picks a random enemy type from the roster.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RandomizeEnemySelection;

/// Selects an enemy type by index. Out of range indices are clamped.
#[derive(Event, Debug, Clone, Copy)]
pub struct SelectEnemy {
    pub index: usize,
}

/// Triggered after the stats table has been applied to the roster.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDataApplied {
    pub elements: usize,
}
