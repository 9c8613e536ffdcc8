use {
    bevy::prelude::*,
    tracking_components::{TrackedChannel, TrackingError},
    transform_data_assets::{QuaternionData, TransformData, Vector3Data},
};

/// Writes the tracker's current position and rotation once.
///
/// When the tracker has no `TransformData` yet, `data` becomes its default.
#[derive(Event, Debug, Clone)]
pub struct TrackTransform {
    pub entity: Entity,
    pub data: Option<Handle<TransformData>>,
}

/// Writes a single channel once.
#[derive(Event, Debug, Clone, Copy)]
pub struct TrackChannel {
    pub entity: Entity,
    pub channel: TrackedChannel,
}

/// Starts mirroring the position every fixed tick. `None` reuses the bound cell
/// or falls back to the tracker's `TransformData`.
#[derive(Event, Debug, Clone)]
pub struct StartPositionTracking {
    pub entity: Entity,
    pub destination: Option<Handle<Vector3Data>>,
}

#[derive(Event, Debug, Clone)]
pub struct StartRotationTracking {
    pub entity: Entity,
    pub destination: Option<Handle<QuaternionData>>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct StopTracking {
    pub entity: Entity,
    pub channel: TrackedChannel,
}

/// Fired when a tracking request could not be honoured.
#[derive(Event, Debug, Clone)]
pub struct TrackingRejected {
    pub entity: Entity,
    pub error: TrackingError,
}
