use cgmath::{Quaternion, Rotation, Vector3, Zero};

use crate::Transform;

const NUM_CORNERS: usize = 8;

/// Oriented bounding box used to reject query points before running a
/// shape's full geometry test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    pub center: Vector3<f32>,
    pub orientation: Quaternion<f32>,
    pub half_extents: Vector3<f32>,
}

impl BoundingVolume {
    pub fn new(
        center: Vector3<f32>,
        orientation: Quaternion<f32>,
        half_extents: Vector3<f32>,
    ) -> Self {
        Self {
            center,
            orientation,
            half_extents,
        }
    }

    /// Box centered on `transform` with the given half extents
    pub fn around(transform: &Transform, half_extents: Vector3<f32>) -> Self {
        Self::new(transform.position, transform.orientation, half_extents)
    }

    /// Boundary points count as inside
    pub fn contains(&self, point: Vector3<f32>) -> bool {
        let local = self.orientation.invert().rotate_vector(point - self.center);

        local.x.abs() <= self.half_extents.x
            && local.y.abs() <= self.half_extents.y
            && local.z.abs() <= self.half_extents.z
    }

    pub fn corners(&self) -> [Vector3<f32>; NUM_CORNERS] {
        let mut out = [Vector3::zero(); NUM_CORNERS];
        let size = self.half_extents;

        for (index, corner) in out.iter_mut().enumerate() {
            let (x, y, z) = (
                if index & 0x01 > 0 { size.x } else { -size.x },
                if index & 0x02 > 0 { size.y } else { -size.y },
                if index & 0x04 > 0 { size.z } else { -size.z },
            );

            *corner = self.orientation.rotate_vector(Vector3 { x, y, z }) + self.center
        }

        out
    }
}
