use bevy::prelude::*;

/// Ordering inside `FixedUpdate`. Mirroring runs last so destination cells hold
/// the transform as it stands at the end of the tick.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSchedule {
    Lifecycle,
    Mirror,
}
