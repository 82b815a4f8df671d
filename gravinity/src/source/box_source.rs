use cgmath::{InnerSpace, Vector3, Zero};

use crate::{BoundingVolume, Transform, properties::SourceProperties};

use super::{FieldEvaluate, FieldShape};

const NUM_AXES: usize = 3;

// Relative widening of the rejection volume, a few ulps
const BOUNDS_MARGIN: f32 = f32::EPSILON * 4.0;

/// Pulls toward the nearest point of a box surface from outside, or when
/// inverted pushes out toward the nearest face from inside
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    pub(crate) surface_dimensions: Vector3<f32>,
}

impl BoxShape {
    pub fn new(surface_dimensions: impl Into<Vector3<f32>>) -> FieldShape {
        let mut shape = Self {
            surface_dimensions: Vector3::zero(),
        };
        shape.set_surface_dimensions(surface_dimensions);

        FieldShape::Box(shape)
    }

    pub fn surface_dimensions(&self) -> Vector3<f32> {
        self.surface_dimensions
    }

    pub fn set_surface_dimensions(&mut self, surface_dimensions: impl Into<Vector3<f32>>) {
        let dimensions = surface_dimensions.into();

        self.surface_dimensions = Vector3::new(
            dimensions.x.abs(),
            dimensions.y.abs(),
            dimensions.z.abs(),
        );
    }

    #[inline]
    fn half_extents(&self) -> Vector3<f32> {
        self.surface_dimensions * 0.5
    }

    fn evaluate_outside(
        &self,
        local: Vector3<f32>,
        properties: &SourceProperties,
    ) -> Vector3<f32> {
        let half_extents = self.half_extents();

        let mut excess = Vector3::zero();
        let mut outside_axes = 0;

        for axis in 0..NUM_AXES {
            let overshoot = local[axis].abs() - half_extents[axis];

            if overshoot > 0.0 {
                excess[axis] = overshoot.copysign(local[axis]);
                outside_axes += 1;
            }
        }

        let distance = match outside_axes {
            // Inside the surface there is nothing to pull toward
            0 => return Vector3::zero(),
            // Facing a single face
            1 => excess.x.abs() + excess.y.abs() + excess.z.abs(),
            // Edge or corner region
            _ => excess.magnitude(),
        };

        let factor = properties.falloff_factor(distance);
        if factor == 0.0 {
            return Vector3::zero();
        }

        -excess / distance * (properties.strength() * factor)
    }

    fn evaluate_inside(
        &self,
        local: Vector3<f32>,
        properties: &SourceProperties,
    ) -> Vector3<f32> {
        let half_extents = self.half_extents();

        // Nearest face wins, the earlier axis on ties
        let mut nearest_axis = 0;
        let mut depth = f32::MAX;

        for axis in 0..NUM_AXES {
            let face_distance = half_extents[axis] - local[axis].abs();

            if face_distance < depth {
                nearest_axis = axis;
                depth = face_distance;
            }
        }

        let factor = properties.falloff_factor(depth);
        if factor == 0.0 {
            return Vector3::zero();
        }

        let mut direction = Vector3::zero();
        direction[nearest_axis] = local[nearest_axis].signum();

        direction * (properties.strength() * factor)
    }
}

impl FieldEvaluate for BoxShape {
    fn evaluate(
        &self,
        transform: &Transform,
        properties: &SourceProperties,
        bounds: Option<&BoundingVolume>,
        point: Vector3<f32>,
    ) -> Vector3<f32> {
        if let Some(bounds) = bounds {
            if !bounds.contains(point) {
                return Vector3::zero();
            }
        }

        let local = transform.to_local(point);

        let local_gravity = if properties.inverted() {
            self.evaluate_inside(local, properties)
        } else {
            self.evaluate_outside(local, properties)
        };

        transform.to_world_direction(local_gravity)
    }

    fn bounding_volume(
        &self,
        transform: &Transform,
        properties: &SourceProperties,
    ) -> Option<BoundingVolume> {
        let half_extents = if properties.inverted() {
            // Same comparison as the nearest face depth, no margin needed
            self.half_extents()
        } else {
            // Rounding must never reject a point the full test puts in range
            let range = properties.range();
            self.half_extents().map(|half| half + range + (half + range) * BOUNDS_MARGIN)
        };

        Some(BoundingVolume::around(transform, half_extents))
    }
}

#[cfg(test)]
mod test {
    use cgmath::{Deg, Quaternion, Rotation3};

    use super::*;
    use crate::{FieldSource, FieldSourceBuilder};

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-4
    }

    fn crate_box() -> FieldSource {
        FieldSourceBuilder::cuboid([2.0, 2.0, 2.0])
            .range(1.0)
            .falloff_distance(0.0)
            .strength(9.81)
            .build()
    }

    #[test]
    fn test_face_at_falloff_start() {
        let gravity = crate_box().evaluate(Vector3::new(2.0, 0.0, 0.0));

        assert!(close(gravity, Vector3::new(-9.81, 0.0, 0.0)));
    }

    #[test]
    fn test_inside_is_weightless() {
        let source = crate_box();

        assert!(source.evaluate(Vector3::zero()).is_zero());
        assert!(source.evaluate(Vector3::new(0.9, -0.9, 0.5)).is_zero());
    }

    #[test]
    fn test_beyond_range_is_zero() {
        let source = crate_box();

        assert!(source.evaluate(Vector3::new(0.0, 2.01, 0.0)).is_zero());
        // Inside the padded bounds but more than range from the corner
        assert!(source.evaluate(Vector3::new(1.9, 1.9, 0.0)).is_zero());
    }

    #[test]
    fn test_edge_pulls_diagonally() {
        let source = FieldSourceBuilder::cuboid([2.0, 2.0, 2.0])
            .range(2.0)
            .falloff_distance(1.0)
            .strength(1.0)
            .build();

        // 0.5 past both the +X and +Y faces
        let gravity = source.evaluate(Vector3::new(1.5, 1.5, 0.0));
        let diagonal = -Vector3::new(1.0, 1.0, 0.0).normalize();

        assert!(close(gravity, diagonal));
    }

    #[test]
    fn test_face_falloff_blend() {
        let source = FieldSourceBuilder::cuboid([4.0, 4.0, 4.0])
            .range(4.0)
            .falloff_distance(2.0)
            .strength(3.0)
            .build();

        // 3 units from the -Z face: halfway through the blend band
        let gravity = source.evaluate(Vector3::new(0.5, 0.0, -5.0));
        assert!(close(gravity, Vector3::new(0.0, 0.0, 1.5)));
    }

    #[test]
    fn test_bounds_never_change_results() {
        let source = FieldSourceBuilder::cuboid([3.0, 1.0, 2.0])
            .orientation(Quaternion::from_angle_y(Deg(30.0)))
            .position([1.0, -2.0, 0.5])
            .range(2.5)
            .falloff_distance(1.0)
            .build();

        let FieldShape::Box(shape) = source.shape() else {
            panic!("expected a box shape");
        };

        for x in -8..=8 {
            for y in -8..=8 {
                for z in -8..=8 {
                    let point = Vector3::new(x as f32, y as f32, z as f32) * 0.6;

                    let with_bounds = source.evaluate(point);
                    let without_bounds =
                        shape.evaluate(source.transform(), source.properties(), None, point);

                    assert!(close(with_bounds, without_bounds));
                }
            }
        }
    }

    #[test]
    fn test_bounds_keep_points_at_range_edge() {
        let source = FieldSourceBuilder::cuboid([f32::from_bits(0x41495545); 3])
            .range(f32::from_bits(0x41010d4a))
            .falloff_distance(0.0)
            .strength(1.0)
            .build();

        let FieldShape::Box(shape) = source.shape() else {
            panic!("expected a box shape");
        };

        let point = Vector3::new(f32::from_bits(0x4165b7ed), 0.0, 0.0);
        assert!(close(source.evaluate(point), Vector3::new(-1.0, 0.0, 0.0)));

        // Walk a few hundred ulps across the range edge on every axis
        let edge = shape.half_extents().x + source.properties().range();
        for step in -256_i32..=256 {
            let offset = f32::from_bits(edge.to_bits().wrapping_add_signed(step));

            for axis in 0..NUM_AXES {
                for sign in [1.0, -1.0] {
                    let mut point = Vector3::zero();
                    point[axis] = offset * sign;

                    let with_bounds = source.evaluate(point);
                    let without_bounds =
                        shape.evaluate(source.transform(), source.properties(), None, point);

                    assert_eq!(with_bounds, without_bounds);
                }
            }
        }
    }

    fn room() -> FieldSource {
        FieldSourceBuilder::cuboid([10.0, 6.0, 20.0])
            .inverted(true)
            .range(1.0)
            .falloff_distance(1.0)
            .strength(2.0)
            .build()
    }

    #[test]
    fn test_inverted_pushes_to_nearest_face() {
        let source = room();

        // Floor is 0.5 away, the X walls 5 away
        assert!(close(
            source.evaluate(Vector3::new(0.0, -2.5, 0.0)),
            Vector3::new(0.0, -2.0, 0.0)
        ));

        // Ceiling band: 1.5 from the ceiling, halfway through the falloff
        assert!(close(
            source.evaluate(Vector3::new(0.0, 1.5, 0.0)),
            Vector3::new(0.0, 1.0, 0.0)
        ));

        // Near the +X wall
        assert!(close(
            source.evaluate(Vector3::new(4.5, 0.0, 3.0)),
            Vector3::new(2.0, 0.0, 0.0)
        ));
    }

    #[test]
    fn test_inverted_tie_prefers_earlier_axis() {
        let source = FieldSourceBuilder::cuboid([4.0, 4.0, 4.0])
            .inverted(true)
            .range(1.0)
            .strength(1.0)
            .build();

        // Equally close to the +X and +Y faces
        let gravity = source.evaluate(Vector3::new(1.5, 1.5, 0.0));
        assert!(close(gravity, Vector3::new(1.0, 0.0, 0.0)));

        // Equally close to the +Y and -Z faces
        let gravity = source.evaluate(Vector3::new(0.0, 1.5, -1.5));
        assert!(close(gravity, Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_inverted_outside_and_deep_are_zero() {
        let source = room();

        assert!(source.evaluate(Vector3::new(0.0, 3.5, 0.0)).is_zero());
        assert!(source.evaluate(Vector3::zero()).is_zero());
    }
}
