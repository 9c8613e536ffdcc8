mod params;
pub mod systems;


pub use params::*;

use {
    bevy::prelude::*, system_schedule::TickSchedule,
    tracking_components::TrackingComponentsPlugin,
    transform_data_assets::TransformDataAssetsPlugin,
};

pub struct TrackingPlugin;

impl Plugin for TrackingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((TransformDataAssetsPlugin, TrackingComponentsPlugin))
            .add_systems(
                FixedUpdate,
                systems::mirror_tracked_values.in_set(TickSchedule::Mirror),
            )
            .add_observer(systems::on_tracker_added)
            .add_observer(systems::on_track_transform)
            .add_observer(systems::on_track_channel)
            .add_observer(systems::on_start_position_tracking)
            .add_observer(systems::on_start_rotation_tracking)
            .add_observer(systems::on_stop_tracking);
    }
}
