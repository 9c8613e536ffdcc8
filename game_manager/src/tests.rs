use {
    crate::*,
    bevy::{prelude::*, state::app::StatesPlugin, time::TimeUpdateStrategy},
    game_events::{
        GameOver, GameRestart, GameStart, GameWin, LateInit, ManagerAwake, ManagerStart,
    },
    std::time::Duration,
};

#[derive(Resource, Default)]
struct Hooks(Vec<&'static str>);

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO))
        .add_plugins(GameManagerPlugin)
        .init_resource::<Hooks>()
        .add_observer(|_: On<ManagerAwake>, mut hooks: ResMut<Hooks>| hooks.0.push("awake"))
        .add_observer(|_: On<ManagerStart>, mut hooks: ResMut<Hooks>| hooks.0.push("start"))
        .add_observer(|_: On<LateInit>, mut hooks: ResMut<Hooks>| hooks.0.push("late_init"))
        .add_observer(|_: On<GameStart>, mut hooks: ResMut<Hooks>| hooks.0.push("game_start"))
        .add_observer(|_: On<GameOver>, mut hooks: ResMut<Hooks>| hooks.0.push("game_over"))
        .add_observer(|_: On<GameWin>, mut hooks: ResMut<Hooks>| hooks.0.push("game_win"))
        .add_observer(|_: On<GameRestart>, mut hooks: ResMut<Hooks>| {
            hooks.0.push("restart")
        });
    app
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn hooks(app: &App) -> Vec<&'static str> {
    app.world().resource::<Hooks>().0.clone()
}

fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Boots the app through late init and applies the resulting state change.
fn boot(app: &mut App) {
    app.update();
    for _ in 0..3 {
        tick(app);
    }
    app.update();
}

#[test]
fn test_awake_then_start_on_first_update() {
    let mut app = test_app();
    app.update();

    assert_eq!(hooks(&app), vec!["awake", "start"]);
    assert_eq!(state(&app), GameState::Booting);
}

#[test]
fn test_late_init_fires_once_on_third_tick() {
    let mut app = test_app();
    app.update();

    tick(&mut app);
    tick(&mut app);
    assert!(!hooks(&app).contains(&"late_init"));

    tick(&mut app);
    assert_eq!(hooks(&app), vec!["awake", "start", "late_init"]);

    for _ in 0..5 {
        tick(&mut app);
    }
    let late_inits = hooks(&app).iter().filter(|hook| **hook == "late_init").count();
    assert_eq!(late_inits, 1);
    assert!(app.world().resource::<GameManager>().late_init_done());

    app.update();
    assert_eq!(state(&app), GameState::Ready);
}

#[test]
fn test_requests_dispatch_hooks_and_move_state() {
    let mut app = test_app();
    boot(&mut app);

    app.world_mut().trigger(GameRequest::StartGame);
    app.update();
    assert_eq!(state(&app), GameState::Playing);

    app.world_mut().trigger(GameRequest::GameWin);
    app.update();
    assert_eq!(state(&app), GameState::Won);

    app.world_mut().trigger(GameRequest::RestartGame);
    app.update();
    assert_eq!(state(&app), GameState::Ready);

    app.world_mut().trigger(GameRequest::StartGame);
    app.world_mut().trigger(GameRequest::GameOver);
    app.update();
    assert_eq!(state(&app), GameState::Lost);

    assert_eq!(
        hooks(&app),
        vec![
            "awake",
            "start",
            "late_init",
            "game_start",
            "game_win",
            "restart",
            "game_start",
            "game_over",
        ]
    );
    assert_eq!(app.world().resource::<GameManager>().rounds_started(), 2);
}

#[test]
fn test_unexpected_request_is_still_dispatched() {
    let mut app = test_app();
    app.update();

    app.world_mut().trigger(GameRequest::GameOver);
    app.update();

    assert_eq!(hooks(&app), vec!["awake", "start", "game_over"]);
    assert_eq!(state(&app), GameState::Lost);
}

#[test]
fn test_request_for_current_state_does_not_reenter_it() {
    #[derive(Resource, Default)]
    struct ReadyEntries(u32);

    let mut app = test_app();
    app.init_resource::<ReadyEntries>().add_systems(
        OnEnter(GameState::Ready),
        |mut entries: ResMut<ReadyEntries>| entries.0 += 1,
    );
    boot(&mut app);
    assert_eq!(app.world().resource::<ReadyEntries>().0, 1);

    app.world_mut().trigger(GameRequest::RestartGame);
    app.update();
    app.update();

    assert_eq!(state(&app), GameState::Ready);
    assert_eq!(app.world().resource::<ReadyEntries>().0, 1);
    assert!(hooks(&app).contains(&"restart"));
}

#[test]
fn test_zero_late_init_ticks_fires_on_first_tick() {
    let mut manager = GameManager::default();
    assert!(!manager.tick());

    manager.arm_late_init(0);
    assert!(manager.tick());
    assert!(!manager.tick());
}

#[test]
fn test_expected_transitions() {
    assert!(is_expected(GameRequest::StartGame, GameState::Ready));
    assert!(!is_expected(GameRequest::StartGame, GameState::Playing));
    assert!(is_expected(GameRequest::GameWin, GameState::Playing));
    assert!(!is_expected(GameRequest::GameOver, GameState::Won));
    assert!(is_expected(GameRequest::RestartGame, GameState::Lost));
    assert!(!is_expected(GameRequest::RestartGame, GameState::Booting));
}
