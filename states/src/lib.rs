use bevy::prelude::*;

/// Top level flow driven by the game manager.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Awake and start hooks have run, late init is still pending.
    #[default]
    Booting,
    /// Late init has fired; waiting for a start request.
    Ready,
    Playing,
    Lost,
    Won,
}

impl GameState {
    /// A round has ended, either way.
    pub fn is_finished(&self) -> bool {
        matches!(self, GameState::Lost | GameState::Won)
    }
}
