use {
    bevy::prelude::*,
    thiserror::Error,
    transform_data_assets::{QuaternionData, TransformData, ValueCell, Vector3Data},
};

pub struct TrackingComponentsPlugin;

impl Plugin for TrackingComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TrackedChannel>()
            .register_type::<MirrorTask>();
    }
}

/// The independently trackable value kinds of a transform.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedChannel {
    Position,
    Rotation,
}

impl TrackedChannel {
    pub const ALL: [TrackedChannel; 2] = [TrackedChannel::Position, TrackedChannel::Rotation];
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackingError {
    #[error("{0:?} channel has no destination cell bound")]
    UnboundDestination(TrackedChannel),
    #[error("{0:?} channel is already running with a different destination")]
    ChannelAlreadyRunning(TrackedChannel),
    #[error("entity {0} has no transform tracker")]
    MissingTracker(Entity),
    #[error("{0:?} destination cell no longer exists")]
    MissingCell(TrackedChannel),
    #[error("transform data requested for {0} no longer exists")]
    MissingTransformData(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new mirror task was spawned.
    Launched(Entity),
    /// The channel was already running with the requested destination.
    AlreadyRunning,
}

/// Per-channel state: the bound destination cell and the running task, if any.
///
/// `Stopped` is `task == None`. The destination survives a stop so a later
/// start without an explicit destination resumes into the same cell.
#[derive(Debug)]
pub struct MirrorChannel<T: ValueCell> {
    kind: TrackedChannel,
    destination: Option<Handle<T>>,
    task: Option<Entity>,
}

impl<T: ValueCell> MirrorChannel<T> {
    pub fn new(kind: TrackedChannel) -> Self {
        Self {
            kind,
            destination: None,
            task: None,
        }
    }

    pub fn kind(&self) -> TrackedChannel {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn task(&self) -> Option<Entity> {
        self.task
    }

    pub fn destination(&self) -> Option<&Handle<T>> {
        self.destination.as_ref()
    }

    /// Rebinds the destination. Only allowed while stopped, or when the new
    /// destination is the one already bound.
    pub fn bind(&mut self, destination: Handle<T>) -> Result<(), TrackingError> {
        if self.is_running() && !self.is_bound_to(&destination) {
            return Err(TrackingError::ChannelAlreadyRunning(self.kind));
        }
        self.destination = Some(destination);
        Ok(())
    }

    /// Binds `destination` and records the task produced by `spawn_task`.
    ///
    /// `spawn_task` only runs when the channel goes from stopped to running.
    pub fn launch(
        &mut self,
        destination: Handle<T>,
        spawn_task: impl FnOnce() -> Entity,
    ) -> Result<StartOutcome, TrackingError> {
        if self.is_running() {
            return if self.is_bound_to(&destination) {
                Ok(StartOutcome::AlreadyRunning)
            } else {
                Err(TrackingError::ChannelAlreadyRunning(self.kind))
            };
        }

        self.destination = Some(destination);
        let task = spawn_task();
        self.task = Some(task);
        Ok(StartOutcome::Launched(task))
    }

    /// Releases the task handle. Returns the task that has to be despawned.
    pub fn cancel(&mut self) -> Option<Entity> {
        self.task.take()
    }

    fn is_bound_to(&self, destination: &Handle<T>) -> bool {
        self.destination
            .as_ref()
            .is_some_and(|bound| bound.id() == destination.id())
    }
}

/// Mirrors the entity's `GlobalTransform` into shared value cells.
///
/// Insertion acts as the tracker's awake: with `single_track_on_start` both channels
/// are written once, otherwise `continuous_track_on_start` starts both channels on
/// the `transform_data` cells.
#[derive(Component, Debug)]
#[require(Transform)]
pub struct TransformTracker {
    pub transform_data: Option<Handle<TransformData>>,
    pub single_track_on_start: bool,
    pub continuous_track_on_start: bool,
    position: MirrorChannel<Vector3Data>,
    rotation: MirrorChannel<QuaternionData>,
}

impl Default for TransformTracker {
    fn default() -> Self {
        Self {
            transform_data: None,
            single_track_on_start: false,
            continuous_track_on_start: false,
            position: MirrorChannel::new(TrackedChannel::Position),
            rotation: MirrorChannel::new(TrackedChannel::Rotation),
        }
    }
}

impl TransformTracker {
    pub fn new(transform_data: Handle<TransformData>) -> Self {
        Self {
            transform_data: Some(transform_data),
            ..default()
        }
    }

    pub fn single_track_on_start(mut self) -> Self {
        self.single_track_on_start = true;
        self
    }

    pub fn continuous_track_on_start(mut self) -> Self {
        self.continuous_track_on_start = true;
        self
    }

    pub fn position(&self) -> &MirrorChannel<Vector3Data> {
        &self.position
    }

    pub fn position_mut(&mut self) -> &mut MirrorChannel<Vector3Data> {
        &mut self.position
    }

    pub fn rotation(&self) -> &MirrorChannel<QuaternionData> {
        &self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut MirrorChannel<QuaternionData> {
        &mut self.rotation
    }

    pub fn is_running(&self, channel: TrackedChannel) -> bool {
        self.task(channel).is_some()
    }

    pub fn task(&self, channel: TrackedChannel) -> Option<Entity> {
        match channel {
            TrackedChannel::Position => self.position.task(),
            TrackedChannel::Rotation => self.rotation.task(),
        }
    }

    pub fn cancel(&mut self, channel: TrackedChannel) -> Option<Entity> {
        match channel {
            TrackedChannel::Position => self.position.cancel(),
            TrackedChannel::Rotation => self.rotation.cancel(),
        }
    }
}

/// A running periodic mirror. Spawned as a child of its tracker, so despawning
/// the tracker cancels it.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct MirrorTask {
    pub tracker: Entity,
    pub channel: TrackedChannel,
    /// Set once a failed write has been logged; cleared by the next successful
    /// write.
    pub failure_reported: bool,
}

impl MirrorTask {
    pub fn new(tracker: Entity, channel: TrackedChannel) -> Self {
        Self {
            tracker,
            channel,
            failure_reported: false,
        }
    }
}
