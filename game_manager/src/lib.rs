mod systems;

#[cfg(test)]
mod tests;

use {bevy::prelude::*, game_events::GameRequest, states::GameState, system_schedule::TickSchedule};

/// Central dispatcher for the game lifecycle hooks in `game_events`.
pub struct GameManagerPlugin;

impl Plugin for GameManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .register_type::<GameManagerSettings>()
            .init_resource::<GameManagerSettings>()
            .init_resource::<GameManager>()
            .add_systems(PreStartup, systems::dispatch_awake)
            .add_systems(Startup, systems::dispatch_start)
            .add_systems(
                FixedUpdate,
                systems::count_down_late_init.in_set(TickSchedule::Lifecycle),
            )
            .add_observer(systems::handle_game_request);
    }
}

#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource, Default)]
pub struct GameManagerSettings {
    /// Fixed ticks between the start hook and late init.
    pub late_init_ticks: u32,
}

impl Default for GameManagerSettings {
    fn default() -> Self {
        Self { late_init_ticks: 3 }
    }
}

#[derive(Resource, Debug, Default)]
pub struct GameManager {
    late_init_remaining: Option<u32>,
    late_init_done: bool,
    rounds_started: u32,
}

impl GameManager {
    /// Schedules late init `ticks` fixed ticks from now. Zero is treated as one.
    pub fn arm_late_init(&mut self, ticks: u32) {
        self.late_init_remaining = Some(ticks.max(1));
    }

    /// Advances the late init countdown by one fixed tick.
    /// Returns true only on the tick late init is due.
    pub fn tick(&mut self) -> bool {
        let Some(remaining) = self.late_init_remaining.as_mut() else {
            return false;
        };
        *remaining -= 1;
        if *remaining > 0 {
            return false;
        }

        self.late_init_remaining = None;
        self.late_init_done = true;
        true
    }

    pub fn late_init_done(&self) -> bool {
        self.late_init_done
    }

    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }
}

/// Whether `request` is the usual next step from `state`. Unusual requests are
/// still dispatched.
pub fn is_expected(request: GameRequest, state: GameState) -> bool {
    match request {
        GameRequest::StartGame => state == GameState::Ready,
        GameRequest::GameOver | GameRequest::GameWin => state == GameState::Playing,
        GameRequest::RestartGame => state == GameState::Playing || state.is_finished(),
    }
}

/// State the game moves to once `request` has been dispatched.
pub fn target_state(request: GameRequest) -> GameState {
    match request {
        GameRequest::StartGame => GameState::Playing,
        GameRequest::GameOver => GameState::Lost,
        GameRequest::GameWin => GameState::Won,
        GameRequest::RestartGame => GameState::Ready,
    }
}
