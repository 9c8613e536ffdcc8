use {
    bevy::{ecs::system::SystemParam, prelude::*, transform::helper::TransformHelper},
    tracking_components::{
        MirrorChannel, MirrorTask, StartOutcome, TrackedChannel, TrackingError, TransformTracker,
    },
    tracking_events::TrackingRejected,
    transform_data_assets::{QuaternionData, TransformData, ValueCell, Vector3Data},
};

/// A value cell that can be fed from a transform channel.
pub trait TrackedValue: ValueCell + Sized {
    const CHANNEL: TrackedChannel;

    /// Reads the current source value.
    fn sample(source: &GlobalTransform) -> Self::Value;

    fn default_cell(data: &TransformData) -> &Handle<Self>;

    fn channel(tracker: &TransformTracker) -> &MirrorChannel<Self>;

    fn channel_mut(tracker: &mut TransformTracker) -> &mut MirrorChannel<Self>;

    fn cells<'a>(cells: &'a mut ValueCells<'_>) -> &'a mut Assets<Self>;
}

impl TrackedValue for Vector3Data {
    const CHANNEL: TrackedChannel = TrackedChannel::Position;

    fn sample(source: &GlobalTransform) -> Vec3 {
        source.translation()
    }

    fn default_cell(data: &TransformData) -> &Handle<Self> {
        &data.position
    }

    fn channel(tracker: &TransformTracker) -> &MirrorChannel<Self> {
        tracker.position()
    }

    fn channel_mut(tracker: &mut TransformTracker) -> &mut MirrorChannel<Self> {
        tracker.position_mut()
    }

    fn cells<'a>(cells: &'a mut ValueCells<'_>) -> &'a mut Assets<Self> {
        &mut cells.positions
    }
}

impl TrackedValue for QuaternionData {
    const CHANNEL: TrackedChannel = TrackedChannel::Rotation;

    fn sample(source: &GlobalTransform) -> Quat {
        let (_scale, rotation, _translation) = source.to_scale_rotation_translation();
        rotation
    }

    fn default_cell(data: &TransformData) -> &Handle<Self> {
        &data.rotation
    }

    fn channel(tracker: &TransformTracker) -> &MirrorChannel<Self> {
        tracker.rotation()
    }

    fn channel_mut(tracker: &mut TransformTracker) -> &mut MirrorChannel<Self> {
        tracker.rotation_mut()
    }

    fn cells<'a>(cells: &'a mut ValueCells<'_>) -> &'a mut Assets<Self> {
        &mut cells.rotations
    }
}

/// Write access to every destination cell kind.
#[derive(SystemParam)]
pub struct ValueCells<'w> {
    positions: ResMut<'w, Assets<Vector3Data>>,
    rotations: ResMut<'w, Assets<QuaternionData>>,
}

impl ValueCells<'_> {
    pub fn store<T: TrackedValue>(
        &mut self,
        destination: &Handle<T>,
        value: T::Value,
    ) -> Result<(), TrackingError> {
        let Some(mut cell) = T::cells(self).get_mut(destination) else {
            return Err(TrackingError::MissingCell(T::CHANNEL));
        };
        cell.set(value);
        Ok(())
    }
}

/// The channel's bound cell, or the tracker's `TransformData` default.
pub fn resolve_destination<T: TrackedValue>(
    tracker: &TransformTracker,
    transform_data: &Assets<TransformData>,
) -> Option<Handle<T>> {
    T::channel(tracker).destination().cloned().or_else(|| {
        tracker
            .transform_data
            .as_ref()
            .and_then(|handle| transform_data.get(handle))
            .map(|data| T::default_cell(data).clone())
    })
}

/// Entry point for driving transform trackers from any system or observer.
///
/// Every operation returns its failure to the caller; observers route those
/// failures through [`TransformTrackers::reject`].
#[derive(SystemParam)]
pub struct TransformTrackers<'w, 's> {
    commands: Commands<'w, 's>,
    trackers: Query<'w, 's, (&'static mut TransformTracker, &'static GlobalTransform)>,
    transforms: TransformHelper<'w, 's>,
    transform_data: Res<'w, Assets<TransformData>>,
    cells: ValueCells<'w>,
}

impl TransformTrackers<'_, '_> {
    pub fn is_running(&self, entity: Entity, channel: TrackedChannel) -> bool {
        self.trackers
            .get(entity)
            .is_ok_and(|(tracker, _)| tracker.is_running(channel))
    }

    /// The tracker's world transform as it stands right now.
    ///
    /// `GlobalTransform` is only propagated once per frame, so one-shot writes
    /// compute it from the hierarchy instead.
    fn source(&self, entity: Entity) -> Result<GlobalTransform, TrackingError> {
        let (_, propagated) = self
            .trackers
            .get(entity)
            .map_err(|_| TrackingError::MissingTracker(entity))?;
        Ok(self
            .transforms
            .compute_global_transform(entity)
            .unwrap_or(*propagated))
    }

    /// Copies the current source value into the channel's destination once.
    pub fn track_once(
        &mut self,
        entity: Entity,
        channel: TrackedChannel,
    ) -> Result<(), TrackingError> {
        match channel {
            TrackedChannel::Position => self.track::<Vector3Data>(entity),
            TrackedChannel::Rotation => self.track::<QuaternionData>(entity),
        }
    }

    pub fn track<T: TrackedValue>(&mut self, entity: Entity) -> Result<(), TrackingError> {
        let (tracker, _) = self
            .trackers
            .get(entity)
            .map_err(|_| TrackingError::MissingTracker(entity))?;
        let destination = resolve_destination::<T>(tracker, &self.transform_data)
            .ok_or(TrackingError::UnboundDestination(T::CHANNEL))?;

        self.track_into(entity, &destination)
    }

    /// Copies the current source value into `destination`, whatever the channel
    /// is bound to.
    pub fn track_into<T: TrackedValue>(
        &mut self,
        entity: Entity,
        destination: &Handle<T>,
    ) -> Result<(), TrackingError> {
        let value = T::sample(&self.source(entity)?);
        self.cells.store(destination, value)
    }

    /// Tracks both channels once and returns every failure.
    ///
    /// With `data`, both values are written into its cells, and a tracker
    /// without `TransformData` adopts it as its default. Without `data`, the
    /// channels' own destinations are used.
    pub fn track_transform(
        &mut self,
        entity: Entity,
        data: Option<Handle<TransformData>>,
    ) -> Result<(), Vec<TrackingError>> {
        let results = match data {
            Some(data) => {
                let (mut tracker, _) = self
                    .trackers
                    .get_mut(entity)
                    .map_err(|_| vec![TrackingError::MissingTracker(entity)])?;
                if tracker.transform_data.is_none() {
                    tracker.transform_data = Some(data.clone());
                }

                let Some(cells) = self.transform_data.get(&data).cloned() else {
                    return Err(vec![TrackingError::MissingTransformData(entity)]);
                };
                [
                    self.track_into(entity, &cells.position),
                    self.track_into(entity, &cells.rotation),
                ]
            }
            None => [
                self.track::<Vector3Data>(entity),
                self.track::<QuaternionData>(entity),
            ],
        };

        let errors: Vec<_> = results.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Rebinds a stopped channel to another cell.
    pub fn bind<T: TrackedValue>(
        &mut self,
        entity: Entity,
        destination: Handle<T>,
    ) -> Result<(), TrackingError> {
        let (mut tracker, _) = self
            .trackers
            .get_mut(entity)
            .map_err(|_| TrackingError::MissingTracker(entity))?;
        T::channel_mut(&mut tracker).bind(destination)
    }

    /// Starts mirroring into `destination` every fixed tick.
    ///
    /// Without an explicit destination the bound cell is reused, falling back to
    /// the tracker's `TransformData`.
    pub fn start<T: TrackedValue>(
        &mut self,
        entity: Entity,
        destination: Option<Handle<T>>,
    ) -> Result<StartOutcome, TrackingError> {
        let (mut tracker, _) = self
            .trackers
            .get_mut(entity)
            .map_err(|_| TrackingError::MissingTracker(entity))?;
        let destination = match destination {
            Some(destination) => destination,
            None => resolve_destination::<T>(&tracker, &self.transform_data)
                .ok_or(TrackingError::UnboundDestination(T::CHANNEL))?,
        };

        let commands = &mut self.commands;
        let outcome = T::channel_mut(&mut tracker).launch(destination, || {
            commands
                .spawn((
                    MirrorTask::new(entity, T::CHANNEL),
                    ChildOf(entity),
                ))
                .id()
        })?;

        if let StartOutcome::Launched(task) = outcome {
            debug!(%entity, %task, channel = ?T::CHANNEL, "started continuous tracking");
        }
        Ok(outcome)
    }

    pub fn start_default(
        &mut self,
        entity: Entity,
        channel: TrackedChannel,
    ) -> Result<StartOutcome, TrackingError> {
        match channel {
            TrackedChannel::Position => self.start::<Vector3Data>(entity, None),
            TrackedChannel::Rotation => self.start::<QuaternionData>(entity, None),
        }
    }

    /// Cancels the channel's task. Returns `false` when it was not running.
    pub fn stop(&mut self, entity: Entity, channel: TrackedChannel) -> Result<bool, TrackingError> {
        let (mut tracker, _) = self
            .trackers
            .get_mut(entity)
            .map_err(|_| TrackingError::MissingTracker(entity))?;
        let Some(task) = tracker.cancel(channel) else {
            return Ok(false);
        };

        if let Ok(mut task_commands) = self.commands.get_entity(task) {
            task_commands.despawn();
        }
        debug!(%entity, %task, ?channel, "stopped continuous tracking");
        Ok(true)
    }

    /// Applies the tracker's on-insert settings.
    pub fn awake(&mut self, entity: Entity) {
        let Ok((tracker, _)) = self.trackers.get(entity) else {
            return;
        };
        if tracker.transform_data.is_none() {
            warn!(%entity, "tracker transform data is missing");
            return;
        }
        let single = tracker.single_track_on_start;
        let continuous = tracker.continuous_track_on_start;

        if single {
            if let Err(errors) = self.track_transform(entity, None) {
                for error in errors {
                    self.reject(entity, error);
                }
            }
        } else if continuous {
            for channel in TrackedChannel::ALL {
                if let Err(error) = self.start_default(entity, channel) {
                    self.reject(entity, error);
                }
            }
        }
    }

    /// Logs a failed request and announces it as [`TrackingRejected`].
    pub fn reject(&mut self, entity: Entity, error: TrackingError) {
        warn!(%entity, %error, "tracking request rejected");
        self.commands.trigger(TrackingRejected { entity, error });
    }
}
