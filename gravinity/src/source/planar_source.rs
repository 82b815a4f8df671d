use cgmath::{Vector2, Vector3, Zero};

use crate::{BoundingVolume, Transform, properties::SourceProperties};

use super::{FieldEvaluate, FieldShape};

/// A finite plane in its local X/Z that pulls toward its surface along -up.
/// Only the region above the plane, up to `range`, feels it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarShape {
    pub(crate) dimensions: Vector2<f32>,
}

impl PlanarShape {
    pub fn new(dimensions: impl Into<Vector2<f32>>) -> FieldShape {
        let mut shape = Self {
            dimensions: Vector2::zero(),
        };
        shape.set_dimensions(dimensions);

        FieldShape::Planar(shape)
    }

    pub fn dimensions(&self) -> Vector2<f32> {
        self.dimensions
    }

    pub fn set_dimensions(&mut self, dimensions: impl Into<Vector2<f32>>) {
        let dimensions = dimensions.into();
        self.dimensions = Vector2::new(dimensions.x.abs(), dimensions.y.abs());
    }

    fn influence_volume(
        &self,
        transform: &Transform,
        properties: &SourceProperties,
    ) -> BoundingVolume {
        let height = properties.range() * 0.5;

        BoundingVolume::new(
            transform.to_world(Vector3::new(0.0, height, 0.0)),
            transform.orientation,
            Vector3::new(self.dimensions.x * 0.5, height, self.dimensions.y * 0.5),
        )
    }
}

impl FieldEvaluate for PlanarShape {
    fn evaluate(
        &self,
        transform: &Transform,
        properties: &SourceProperties,
        bounds: Option<&BoundingVolume>,
        point: Vector3<f32>,
    ) -> Vector3<f32> {
        let inside = match bounds {
            Some(bounds) => bounds.contains(point),
            None => self.influence_volume(transform, properties).contains(point),
        };

        if !inside {
            return Vector3::zero();
        }

        let height_over_surface = transform.to_local(point).y;

        let factor = properties.falloff_factor(height_over_surface);
        if factor == 0.0 {
            return Vector3::zero();
        }

        -transform.up() * (properties.strength() * factor)
    }

    fn bounding_volume(
        &self,
        transform: &Transform,
        properties: &SourceProperties,
    ) -> Option<BoundingVolume> {
        Some(self.influence_volume(transform, properties))
    }

    fn supports_inversion(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod test {
    use cgmath::{Deg, InnerSpace, Quaternion, Rotation3};

    use super::*;
    use crate::{FieldSource, FieldSourceBuilder};

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-4
    }

    fn floor() -> FieldSource {
        FieldSourceBuilder::planar([10.0, 4.0])
            .range(5.0)
            .falloff_distance(2.0)
            .strength(9.81)
            .build()
    }

    #[test]
    fn test_pulls_down_near_surface() {
        let source = floor();

        assert!(close(
            source.evaluate(Vector3::new(4.0, 1.0, -1.5)),
            Vector3::new(0.0, -9.81, 0.0)
        ));
        assert!(close(
            source.evaluate(Vector3::new(0.0, 3.0, 0.0)),
            Vector3::new(0.0, -9.81, 0.0)
        ));
    }

    #[test]
    fn test_blends_toward_range() {
        let gravity = floor().evaluate(Vector3::new(0.0, 4.0, 0.0));

        assert!(close(gravity, Vector3::new(0.0, -4.905, 0.0)));
    }

    #[test]
    fn test_outside_extents_is_zero() {
        let source = floor();

        // Below the plane
        assert!(source.evaluate(Vector3::new(0.0, -0.5, 0.0)).is_zero());
        // Above range
        assert!(source.evaluate(Vector3::new(0.0, 5.5, 0.0)).is_zero());
        // Past the X and Z edges
        assert!(source.evaluate(Vector3::new(5.5, 1.0, 0.0)).is_zero());
        assert!(source.evaluate(Vector3::new(0.0, 1.0, 2.5)).is_zero());
    }

    #[test]
    fn test_tilted_plane_pulls_along_its_normal() {
        // A wall facing +X
        let source = FieldSourceBuilder::planar([10.0, 10.0])
            .position([2.0, 0.0, 0.0])
            .orientation(Quaternion::from_angle_z(Deg(-90.0)))
            .range(5.0)
            .falloff_distance(0.0)
            .strength(1.0)
            .build();

        assert!(close(
            source.evaluate(Vector3::new(4.0, 1.0, 1.0)),
            Vector3::new(-1.0, 0.0, 0.0)
        ));
        assert!(source.evaluate(Vector3::new(0.0, 0.0, 0.0)).is_zero());
    }
}
