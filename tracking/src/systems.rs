use {
    crate::{TrackedValue, TransformTrackers, ValueCells},
    bevy::prelude::*,
    tracking_components::{MirrorTask, TrackedChannel, TrackingError, TransformTracker},
    tracking_events::{
        StartPositionTracking, StartRotationTracking, StopTracking, TrackChannel, TrackTransform,
    },
    transform_data_assets::{QuaternionData, Vector3Data},
};

/// One fixed tick of every running mirror task.
///
/// Tasks whose tracker is gone, or whose channel no longer points at them, are
/// despawned without writing.
pub fn mirror_tracked_values(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut MirrorTask)>,
    trackers: Query<(&TransformTracker, &GlobalTransform)>,
    mut cells: ValueCells,
) {
    for (task_entity, mut task) in &mut tasks {
        let Ok((tracker, source)) = trackers.get(task.tracker) else {
            debug!(%task_entity, tracker = %task.tracker, "tracker is gone, dropping mirror task");
            commands.entity(task_entity).despawn();
            continue;
        };

        if tracker.task(task.channel) != Some(task_entity) {
            debug!(%task_entity, channel = ?task.channel, "dropping stale mirror task");
            commands.entity(task_entity).despawn();
            continue;
        }

        let result = match task.channel {
            TrackedChannel::Position => mirror::<Vector3Data>(tracker, source, &mut cells),
            TrackedChannel::Rotation => mirror::<QuaternionData>(tracker, source, &mut cells),
        };

        match result {
            Ok(()) => task.failure_reported = false,
            Err(error) if !task.failure_reported => {
                warn!(%task_entity, tracker = %task.tracker, %error, "mirror task failed to write");
                task.failure_reported = true;
            }
            Err(_) => {}
        }
    }
}

fn mirror<T: TrackedValue>(
    tracker: &TransformTracker,
    source: &GlobalTransform,
    cells: &mut ValueCells,
) -> Result<(), TrackingError> {
    let destination = T::channel(tracker)
        .destination()
        .ok_or(TrackingError::UnboundDestination(T::CHANNEL))?;
    cells.store(destination, T::sample(source))
}

pub fn on_tracker_added(trigger: On<Add, TransformTracker>, mut trackers: TransformTrackers) {
    trackers.awake(trigger.event().entity);
}

pub fn on_track_transform(trigger: On<TrackTransform>, mut trackers: TransformTrackers) {
    let event = trigger.event();
    if let Err(errors) = trackers.track_transform(event.entity, event.data.clone()) {
        for error in errors {
            trackers.reject(event.entity, error);
        }
    }
}

pub fn on_track_channel(trigger: On<TrackChannel>, mut trackers: TransformTrackers) {
    let event = trigger.event();
    if let Err(error) = trackers.track_once(event.entity, event.channel) {
        trackers.reject(event.entity, error);
    }
}

pub fn on_start_position_tracking(
    trigger: On<StartPositionTracking>,
    mut trackers: TransformTrackers,
) {
    let event = trigger.event();
    if let Err(error) = trackers.start::<Vector3Data>(event.entity, event.destination.clone()) {
        trackers.reject(event.entity, error);
    }
}

pub fn on_start_rotation_tracking(
    trigger: On<StartRotationTracking>,
    mut trackers: TransformTrackers,
) {
    let event = trigger.event();
    if let Err(error) = trackers.start::<QuaternionData>(event.entity, event.destination.clone())
    {
        trackers.reject(event.entity, error);
    }
}

pub fn on_stop_tracking(trigger: On<StopTracking>, mut trackers: TransformTrackers) {
    let event = trigger.event();
    if let Err(error) = trackers.stop(event.entity, event.channel) {
        trackers.reject(event.entity, error);
    }
}
