use cgmath::{One, Quaternion, Rotation, Vector3, Zero};

/// World placement of a field source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub orientation: Quaternion<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            orientation: Quaternion::one(),
        }
    }
}

impl Transform {
    pub fn new(position: impl Into<Vector3<f32>>, orientation: Quaternion<f32>) -> Self {
        Self {
            position: position.into(),
            orientation,
        }
    }

    /// Moves a world space point into this transform's local frame
    #[inline]
    pub fn to_local(&self, point: Vector3<f32>) -> Vector3<f32> {
        self.orientation.invert().rotate_vector(point - self.position)
    }

    #[inline]
    pub fn to_world(&self, local_point: Vector3<f32>) -> Vector3<f32> {
        self.orientation.rotate_vector(local_point) + self.position
    }

    #[inline]
    pub fn to_world_direction(&self, local_direction: Vector3<f32>) -> Vector3<f32> {
        self.orientation.rotate_vector(local_direction)
    }

    /// Local +Y in world space
    #[inline]
    pub fn up(&self) -> Vector3<f32> {
        self.to_world_direction(Vector3::unit_y())
    }
}
