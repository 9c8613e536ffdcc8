use bevy::prelude::*;

pub struct TransformDataAssetsPlugin;

impl Plugin for TransformDataAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<Vector3Data>()
            .init_asset::<QuaternionData>()
            .init_asset::<TransformData>();
    }
}

/// Shared value storage that trackers write into and any system may read.
///
/// Cells are assets so that ownership is shared through `Handle`s: the cell lives
/// as long as something (a `TransformData`, a tracker channel, a consumer) holds
/// a strong handle to it.
pub trait ValueCell: Asset {
    type Value: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static;

    fn get(&self) -> Self::Value;

    fn set(&mut self, value: Self::Value);
}

#[derive(Asset, TypePath, Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3Data {
    pub value: Vec3,
}

impl Vector3Data {
    pub fn new(value: Vec3) -> Self {
        Self { value }
    }
}

impl ValueCell for Vector3Data {
    type Value = Vec3;

    fn get(&self) -> Vec3 {
        self.value
    }

    fn set(&mut self, value: Vec3) {
        self.value = value;
    }
}

#[derive(Asset, TypePath, Debug, Clone, Copy, Default, PartialEq)]
pub struct QuaternionData {
    pub value: Quat,
}

impl QuaternionData {
    pub fn new(value: Quat) -> Self {
        Self { value }
    }
}

impl ValueCell for QuaternionData {
    type Value = Quat;

    fn get(&self) -> Quat {
        self.value
    }

    fn set(&mut self, value: Quat) {
        self.value = value;
    }
}

/// A pair of default destination cells for one tracked object.
///
/// Trackers fall back to these cells when a channel has no explicit binding.
#[derive(Asset, TypePath, Debug, Clone)]
pub struct TransformData {
    pub position: Handle<Vector3Data>,
    pub rotation: Handle<QuaternionData>,
}

impl TransformData {
    pub fn new(position: Handle<Vector3Data>, rotation: Handle<QuaternionData>) -> Self {
        Self { position, rotation }
    }

    /// Creates fresh zeroed cells and bundles them.
    pub fn with_new_cells(
        positions: &mut Assets<Vector3Data>,
        rotations: &mut Assets<QuaternionData>,
    ) -> Self {
        Self {
            position: positions.add(Vector3Data::default()),
            rotation: rotations.add(QuaternionData::new(Quat::IDENTITY)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_cell_set_get() {
        let mut cell = Vector3Data::default();
        cell.set(Vec3::new(1.0, -2.0, 3.5));
        assert_eq!(cell.get(), Vec3::new(1.0, -2.0, 3.5));

        let mut cell = QuaternionData::new(Quat::IDENTITY);
        cell.set(Quat::from_rotation_z(1.0));
        assert_eq!(cell.get(), Quat::from_rotation_z(1.0));
    }

    #[test]
    fn test_with_new_cells_creates_distinct_assets() {
        let mut positions = Assets::<Vector3Data>::default();
        let mut rotations = Assets::<QuaternionData>::default();

        let first = TransformData::with_new_cells(&mut positions, &mut rotations);
        let second = TransformData::with_new_cells(&mut positions, &mut rotations);

        assert_ne!(first.position.id(), second.position.id());
        assert_eq!(positions.len(), 2);
        assert_eq!(
            rotations.get(&first.rotation).map(|cell| cell.value),
            Some(Quat::IDENTITY)
        );
    }
}
