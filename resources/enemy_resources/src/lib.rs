use {
    bevy::prelude::*,
    enemy_data_assets::{CreepData, EnemyDataError, EnemyEntry, EnemyStats, EnemyStatsTable},
    rand::Rng,
};

/// The enemy types of a level together with their base stats and the current
/// selection.
///
/// `selection_index` is always a valid index into `entries` when the roster is
/// not empty. A creep's live stats are seeded from its base stats the first time
/// it is selected after an initialization.
#[derive(Resource, Reflect, Debug, Default)]
#[reflect(Resource, Default)]
pub struct EnemyRoster {
    entries: Vec<EnemyEntry>,
    base_stats: Vec<EnemyStats>,
    selection_index: usize,
    seeded: Vec<bool>,
}

impl EnemyRoster {
    pub fn new(entries: Vec<EnemyEntry>) -> Self {
        let mut roster = Self {
            seeded: vec![false; entries.len()],
            entries,
            ..default()
        };
        roster.refresh_names();
        roster
    }

    /// Replaces the enemy types, keeping the selection in range.
    pub fn set_entries(&mut self, entries: Vec<EnemyEntry>) {
        self.seeded = vec![false; entries.len()];
        self.entries = entries;
        self.selection_index = self
            .selection_index
            .min(self.entries.len().saturating_sub(1));
        self.refresh_names();
    }

    pub fn entries(&self) -> &[EnemyEntry] {
        &self.entries
    }

    pub fn base_stats(&self) -> &[EnemyStats] {
        &self.base_stats
    }

    pub fn selection_index(&self) -> usize {
        self.selection_index
    }

    /// Selects an enemy type, clamping `index` into range.
    pub fn set_selection(&mut self, index: usize) -> Result<usize, EnemyDataError> {
        if self.entries.is_empty() {
            return Err(EnemyDataError::EmptyRoster);
        }
        self.selection_index = index.min(self.entries.len() - 1);
        self.seed_selected();
        Ok(self.selection_index)
    }

    pub fn randomize_selection(&mut self, rng: &mut impl Rng) -> Result<usize, EnemyDataError> {
        if self.entries.is_empty() {
            return Err(EnemyDataError::EmptyRoster);
        }
        let index = rng.random_range(0..self.entries.len());
        self.set_selection(index)
    }

    pub fn selected(&self) -> Option<&EnemyEntry> {
        self.entries.get(self.selection_index)
    }

    pub fn prefab_variants(&self) -> &[String] {
        self.selected()
            .map(|entry| entry.prefab_variants.as_slice())
            .unwrap_or_default()
    }

    /// Base stats of the selected enemy, as loaded from the stats table.
    pub fn selection_stats(&self) -> Option<&EnemyStats> {
        self.base_stats.get(self.selection_index)
    }

    /// Live stats of the selected enemy.
    pub fn current(&self) -> Option<&CreepData> {
        self.selected().and_then(|entry| entry.creep.as_ref())
    }

    pub fn current_mut(&mut self) -> Option<&mut CreepData> {
        self.entries
            .get_mut(self.selection_index)
            .and_then(|entry| entry.creep.as_mut())
    }

    pub fn set_health(&mut self, health: f32) {
        if let Some(creep) = self.current_mut() {
            creep.health = health;
        }
    }

    pub fn set_damage(&mut self, damage: f32) {
        if let Some(creep) = self.current_mut() {
            creep.damage = damage;
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        if let Some(creep) = self.current_mut() {
            creep.speed = speed;
        }
    }

    pub fn set_bounty(&mut self, bounty: i32) {
        if let Some(creep) = self.current_mut() {
            creep.bounty = bounty;
        }
    }

    pub fn set_score(&mut self, score: i32) {
        if let Some(creep) = self.current_mut() {
            creep.score = score;
        }
    }

    /// Rebuilds the base stats from `table` and resets the selected enemy's live
    /// stats to its base values. Other creeps are reset when next selected. On
    /// error the roster is left untouched.
    pub fn initialize(&mut self, table: &EnemyStatsTable) -> Result<usize, EnemyDataError> {
        self.base_stats = table.rows()?;
        self.seeded.fill(false);
        self.seed_selected();
        Ok(self.base_stats.len())
    }

    fn seed_selected(&mut self) {
        let index = self.selection_index;
        if self.seeded.get(index).copied().unwrap_or(true) {
            return;
        }
        let Some(stats) = self.base_stats.get(index).copied() else {
            return;
        };
        if let Some(creep) = self.current_mut() {
            creep.apply_base(&stats);
        }
        self.seeded[index] = true;
    }

    /// Names every entry after its creep data, or `Enemy {index}` without one.
    pub fn refresh_names(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.name = match &entry.creep {
                Some(creep) => creep.unit_name.clone(),
                None => format!("Enemy {i}"),
            };
        }
    }

    pub fn log_current(&self) {
        debug!("{}", self.summary());
    }

    pub fn summary(&self) -> String {
        let base = self.selection_stats().copied().unwrap_or_default();
        let live = self.current().cloned().unwrap_or_default();
        format!(
            "------Enemy Data------\n\
             Current Enemy Index: {}\n\
             Current Enemy Base Health: {}\n\
             Current Enemy Total Health: {}\n\
             Current Enemy Base Damage: {}\n\
             Current Enemy Total Damage: {}\n\
             Current Enemy Base Speed: {}\n\
             Current Enemy Total Speed: {}\n\
             Current Enemy Base Bounty: {}\n\
             Current Enemy Total Bounty: {}\n\
             Current Enemy Base Score: {}\n\
             Current Enemy Total Score: {}\n\
             ----------------------",
            self.selection_index,
            base.health,
            live.health,
            base.damage,
            live.damage,
            base.speed,
            live.speed,
            base.bounty,
            live.bounty,
            base.score,
            live.score,
        )
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        rand::{SeedableRng, rngs::StdRng},
    };

    fn creep(name: &str) -> EnemyEntry {
        EnemyEntry {
            creep: Some(CreepData {
                unit_name: name.to_string(),
                ..default()
            }),
            ..default()
        }
    }

    fn table() -> EnemyStatsTable {
        EnemyStatsTable {
            elements: 3,
            enemy_healths: vec![10.0, 20.0, 30.0],
            enemy_damages: vec![1.0, 2.0, 3.0],
            enemy_speeds: vec![5.0, 4.0, 3.0],
            enemy_bounties: vec![1, 2, 3],
            enemy_scores: vec![10, 20, 30],
        }
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut roster = EnemyRoster::new(vec![creep("Eel"), creep("Siren"), creep("Kraken")]);

        assert_eq!(roster.set_selection(1), Ok(1));
        assert_eq!(roster.set_selection(99), Ok(2));
        assert_eq!(roster.selected().map(|e| e.name.as_str()), Some("Kraken"));
    }

    #[test]
    fn test_empty_roster_rejects_selection() {
        let mut roster = EnemyRoster::default();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(roster.set_selection(0), Err(EnemyDataError::EmptyRoster));
        assert_eq!(
            roster.randomize_selection(&mut rng),
            Err(EnemyDataError::EmptyRoster)
        );
        assert_eq!(roster.selection_index(), 0);
    }

    #[test]
    fn test_randomize_stays_in_range() {
        let mut roster = EnemyRoster::new(vec![creep("Eel"), creep("Siren")]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..32 {
            let index = roster.randomize_selection(&mut rng).unwrap();
            assert!(index < 2);
            assert_eq!(roster.selection_index(), index);
        }
    }

    #[test]
    fn test_initialize_resets_selected_creep_only() {
        let mut roster = EnemyRoster::new(vec![creep("Eel"), creep("Siren"), creep("Kraken")]);
        roster.set_selection(1).unwrap();

        assert_eq!(roster.initialize(&table()), Ok(3));

        let live = roster.current().unwrap();
        assert_eq!(live.health, 20.0);
        assert_eq!(live.bounty, 2);
        assert_eq!(live.unit_name, "Siren");
        assert_eq!(roster.selection_stats().map(|s| s.score), Some(20));
        // Other entries keep their live values.
        assert_eq!(roster.entries()[0].creep.as_ref().unwrap().health, 0.0);
    }

    #[test]
    fn test_live_stats_diverge_from_base() {
        let mut roster = EnemyRoster::new(vec![creep("Eel")]);
        roster.initialize(&table()).unwrap();

        roster.set_health(55.0);
        roster.set_score(7);

        assert_eq!(roster.current().unwrap().health, 55.0);
        assert_eq!(roster.current().unwrap().score, 7);
        assert_eq!(roster.selection_stats().unwrap().health, 10.0);
    }

    #[test]
    fn test_initialize_with_short_table_keeps_state() {
        let mut roster = EnemyRoster::new(vec![creep("Eel")]);
        roster.initialize(&table()).unwrap();

        let mut short = table();
        short.enemy_scores.truncate(1);
        assert!(matches!(
            roster.initialize(&short),
            Err(EnemyDataError::TableTooShort { field: "enemyScores", .. })
        ));
        assert_eq!(roster.base_stats().len(), 3);
    }

    #[test]
    fn test_selecting_after_initialize_seeds_live_stats() {
        let mut roster = EnemyRoster::new(vec![creep("Eel"), creep("Siren"), creep("Kraken")]);
        roster.initialize(&table()).unwrap();

        roster.set_selection(2).unwrap();
        let live = roster.current().unwrap();
        assert_eq!(live.health, 30.0);
        assert_eq!(live.speed, 3.0);
        assert_eq!(live.score, 30);

        // Live changes survive switching away and back.
        roster.set_health(5.0);
        roster.set_selection(0).unwrap();
        roster.set_selection(2).unwrap();
        assert_eq!(roster.current().unwrap().health, 5.0);

        // A new table resets the selected creep right away.
        roster.initialize(&table()).unwrap();
        assert_eq!(roster.current().unwrap().health, 30.0);
    }

    #[test]
    fn test_selection_before_initialize_is_seeded_later() {
        let mut roster = EnemyRoster::new(vec![creep("Eel"), creep("Siren")]);
        roster.set_selection(1).unwrap();
        assert_eq!(roster.current().unwrap().health, 0.0);

        roster.initialize(&table()).unwrap();
        assert_eq!(roster.current().unwrap().health, 20.0);
    }

    #[test]
    fn test_names_fall_back_to_index() {
        let roster = EnemyRoster::new(vec![creep("Eel"), EnemyEntry::default()]);

        assert_eq!(roster.entries()[0].name, "Eel");
        assert_eq!(roster.entries()[1].name, "Enemy 1");
    }

    #[test]
    fn test_set_entries_keeps_selection_in_range() {
        let mut roster = EnemyRoster::new(vec![creep("Eel"), creep("Siren"), creep("Kraken")]);
        roster.set_selection(2).unwrap();

        roster.set_entries(vec![creep("Eel")]);
        assert_eq!(roster.selection_index(), 0);
        assert!(roster.prefab_variants().is_empty());
    }
}
