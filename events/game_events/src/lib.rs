use bevy::prelude::*;

// Lifecycle hooks. Any number of observers may subscribe to each of them.

/// Dispatched in `PreStartup`, before anything else runs.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ManagerAwake;

/// Dispatched in `Startup`.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ManagerStart;

/// Dispatched once, a few fixed ticks after [`ManagerStart`], when every
/// system had a chance to initialize.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LateInit;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GameStart;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GameOver;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GameWin;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GameRestart;

/// Asks the game manager to dispatch a hook and move the game state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameRequest {
    StartGame,
    GameOver,
    GameWin,
    RestartGame,
}
