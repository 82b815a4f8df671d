use cgmath::{InnerSpace, Vector3, Zero};

use crate::{BoundingVolume, Transform, properties::SourceProperties};

use super::{FieldEvaluate, FieldShape};

/// Pulls toward its center, or when inverted pushes out toward a shell of
/// radius `inverted_surface_radius`
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalShape {
    pub(crate) inverted_surface_radius: f32,
}

impl SphericalShape {
    pub fn new(inverted_surface_radius: f32) -> FieldShape {
        FieldShape::Spherical(Self {
            inverted_surface_radius: inverted_surface_radius.max(0.0),
        })
    }

    pub fn inverted_surface_radius(&self) -> f32 {
        self.inverted_surface_radius
    }

    pub fn set_inverted_surface_radius(&mut self, radius: f32) {
        self.inverted_surface_radius = radius.max(0.0);
    }
}

impl FieldEvaluate for SphericalShape {
    fn evaluate(
        &self,
        transform: &Transform,
        properties: &SourceProperties,
        _bounds: Option<&BoundingVolume>,
        point: Vector3<f32>,
    ) -> Vector3<f32> {
        let to_center = transform.position - point;
        let sqr_distance = to_center.magnitude2();

        // No direction exists at the exact center
        if sqr_distance == 0.0 {
            return Vector3::zero();
        }

        if properties.inverted() {
            let surface_radius = self.inverted_surface_radius;
            if sqr_distance > surface_radius * surface_radius {
                return Vector3::zero();
            }

            let distance = sqr_distance.sqrt();
            let factor = properties.falloff_factor(surface_radius - distance);
            if factor == 0.0 {
                return Vector3::zero();
            }

            -to_center / distance * (properties.strength() * factor)
        } else {
            let factor = properties.falloff_factor_sqr(sqr_distance);
            if factor == 0.0 {
                return Vector3::zero();
            }

            to_center / sqr_distance.sqrt() * (properties.strength() * factor)
        }
    }

    fn bounding_volume(
        &self,
        _transform: &Transform,
        _properties: &SourceProperties,
    ) -> Option<BoundingVolume> {
        None
    }
}
