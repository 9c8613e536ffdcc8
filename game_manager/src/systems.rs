use {
    crate::{GameManager, GameManagerSettings, is_expected, target_state},
    bevy::prelude::*,
    game_events::{
        GameOver, GameRequest, GameRestart, GameStart, GameWin, LateInit, ManagerAwake,
        ManagerStart,
    },
    states::GameState,
};

pub fn dispatch_awake(mut commands: Commands) {
    debug!("dispatching awake hook");
    commands.trigger(ManagerAwake);
}

pub fn dispatch_start(
    mut commands: Commands,
    mut manager: ResMut<GameManager>,
    settings: Res<GameManagerSettings>,
) {
    debug!(late_init_ticks = settings.late_init_ticks, "dispatching start hook");
    commands.trigger(ManagerStart);
    manager.arm_late_init(settings.late_init_ticks);
}

pub fn count_down_late_init(
    mut commands: Commands,
    mut manager: ResMut<GameManager>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !manager.tick() {
        return;
    }

    info!("dispatching late init hook");
    commands.trigger(LateInit);
    if *state.get() == GameState::Booting {
        next_state.set(GameState::Ready);
    }
}

pub fn handle_game_request(
    trigger: On<GameRequest>,
    mut commands: Commands,
    mut manager: ResMut<GameManager>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let request = *trigger.event();
    let current = *state.get();
    if !is_expected(request, current) {
        debug!(?request, ?current, "request outside its usual state");
    }

    match request {
        GameRequest::StartGame => {
            manager.rounds_started += 1;
            info!(round = manager.rounds_started, "game started");
            commands.trigger(GameStart);
        }
        GameRequest::GameOver => {
            info!("game over");
            commands.trigger(GameOver);
        }
        GameRequest::GameWin => {
            info!("game won");
            commands.trigger(GameWin);
        }
        GameRequest::RestartGame => {
            info!("restarting game");
            commands.trigger(GameRestart);
        }
    }

    // Staying in the current state must not re-run its enter schedule.
    let target = target_state(request);
    if target == current {
        next_state.reset();
    } else {
        next_state.set(target);
    }
}
