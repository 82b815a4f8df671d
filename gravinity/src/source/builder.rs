use cgmath::{One, Quaternion, Vector2, Vector3, Zero};

use crate::{Transform, properties::SourceProperties};

use super::{BoxShape, FieldShape, FieldSource, PlanarShape, SphericalShape};

pub const DEFAULT_RANGE: f32 = 10.0;
pub const DEFAULT_FALLOFF_DISTANCE: f32 = 1.0;
pub const DEFAULT_STRENGTH: f32 = 9.81;

/// Configures a [`FieldSource`]. Anything left unset falls back to the
/// crate defaults; out of range values are clamped on [`FieldSourceBuilder::build`].
#[derive(Debug)]
pub struct FieldSourceBuilder {
    shape: FieldShape,

    position: Option<Vector3<f32>>,
    orientation: Option<Quaternion<f32>>,

    range: Option<f32>,
    falloff_distance: Option<f32>,
    strength: Option<f32>,
    inverted: Option<bool>,
    exclusive: Option<bool>,
    active: Option<bool>,

    inverted_surface_radius: Option<f32>,
}

impl FieldSourceBuilder {
    fn with_shape(shape: FieldShape) -> Self {
        Self {
            shape,
            position: None,
            orientation: None,
            range: None,
            falloff_distance: None,
            strength: None,
            inverted: None,
            exclusive: None,
            active: None,
            inverted_surface_radius: None,
        }
    }

    pub fn spherical() -> Self {
        Self::with_shape(SphericalShape::new(0.0))
    }

    pub fn cuboid(surface_dimensions: impl Into<Vector3<f32>>) -> Self {
        Self::with_shape(BoxShape::new(surface_dimensions))
    }

    pub fn planar(dimensions: impl Into<Vector2<f32>>) -> Self {
        Self::with_shape(PlanarShape::new(dimensions))
    }

    pub fn position(mut self, position: impl Into<Vector3<f32>>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn orientation(mut self, orientation: Quaternion<f32>) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn range(mut self, range: f32) -> Self {
        self.range = Some(range);
        self
    }

    pub fn falloff_distance(mut self, falloff_distance: f32) -> Self {
        self.falloff_distance = Some(falloff_distance);
        self
    }

    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = Some(inverted);
        self
    }

    /// Whether this source captures a point for itself, see
    /// [`SourceProperties::capture_player_exclusive`]
    pub fn exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = Some(exclusive);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Only used by spherical sources
    pub fn inverted_surface_radius(mut self, radius: f32) -> Self {
        self.inverted_surface_radius = Some(radius);
        self
    }

    pub fn build(self) -> FieldSource {
        let mut properties = SourceProperties::new(
            self.range.unwrap_or(DEFAULT_RANGE),
            self.falloff_distance.unwrap_or(DEFAULT_FALLOFF_DISTANCE),
            self.strength.unwrap_or(DEFAULT_STRENGTH),
        );
        properties.set_inverted(self.inverted.unwrap_or(false));
        properties.set_capture_player_exclusive(self.exclusive.unwrap_or(false));

        let mut shape = self.shape;
        if let (FieldShape::Spherical(spherical), Some(radius)) =
            (&mut shape, self.inverted_surface_radius)
        {
            spherical.set_inverted_surface_radius(radius);
        }

        let transform = Transform::new(
            self.position.unwrap_or_else(Vector3::zero),
            self.orientation.unwrap_or_else(Quaternion::one),
        );

        let mut source = FieldSource::new(transform, properties, shape);
        source.set_active(self.active.unwrap_or(true));

        source
    }
}

impl From<FieldSourceBuilder> for FieldSource {
    fn from(value: FieldSourceBuilder) -> Self {
        value.build()
    }
}
