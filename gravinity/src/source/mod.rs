use std::cell::Cell;

use cgmath::{Quaternion, Vector3};
use log::warn;

pub use box_source::BoxShape;
pub use builder::{DEFAULT_FALLOFF_DISTANCE, DEFAULT_RANGE, DEFAULT_STRENGTH, FieldSourceBuilder};
pub use planar_source::PlanarShape;
pub use spherical_source::SphericalShape;

use crate::{BoundingVolume, Transform, properties::SourceProperties};

mod box_source;
mod builder;
mod planar_source;
mod spherical_source;

/// Geometry of a field source
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    Spherical(SphericalShape),
    Box(BoxShape),
    Planar(PlanarShape),
}

pub(crate) trait FieldEvaluate {
    /// World space contribution at `point`. `bounds` is the volume returned by
    /// [`FieldEvaluate::bounding_volume`] for the same transform and properties.
    fn evaluate(
        &self,
        transform: &Transform,
        properties: &SourceProperties,
        bounds: Option<&BoundingVolume>,
        point: Vector3<f32>,
    ) -> Vector3<f32>;

    fn bounding_volume(
        &self,
        transform: &Transform,
        properties: &SourceProperties,
    ) -> Option<BoundingVolume>;

    fn supports_inversion(&self) -> bool {
        true
    }
}

impl FieldShape {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldShape::Spherical(_) => "spherical",
            FieldShape::Box(_) => "box",
            FieldShape::Planar(_) => "planar",
        }
    }

    fn as_evaluator(&self) -> &dyn FieldEvaluate {
        match self {
            FieldShape::Spherical(spherical) => spherical,
            FieldShape::Box(cuboid) => cuboid,
            FieldShape::Planar(planar) => planar,
        }
    }

    pub fn supports_inversion(&self) -> bool {
        self.as_evaluator().supports_inversion()
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedBounds {
    // (source revision, properties revision)
    key: (u64, u64),
    volume: Option<BoundingVolume>,
}

/// A single gravity field source: a shape placed in the world with its own
/// range, falloff and strength
#[derive(Debug, Clone)]
pub struct FieldSource {
    transform: Transform,
    properties: SourceProperties,
    shape: FieldShape,
    active: bool,

    // Bumped whenever the transform or shape changes
    revision: u64,
    bounds: Cell<Option<CachedBounds>>,
}

impl FieldSource {
    pub fn new(transform: Transform, properties: SourceProperties, shape: FieldShape) -> Self {
        let mut source = Self {
            transform,
            properties,
            shape,
            active: true,
            revision: 0,
            bounds: Cell::new(None),
        };

        source.enforce_inversion_support();
        source
    }

    /// The contribution of this source at `point`, regardless of whether the
    /// source is active
    pub fn evaluate(&self, point: Vector3<f32>) -> Vector3<f32> {
        let bounds = self.bounding_volume();

        self.shape.as_evaluator().evaluate(
            &self.transform,
            &self.properties,
            bounds.as_ref(),
            point,
        )
    }

    /// Rejection volume for box and planar sources, recomputed lazily when the
    /// transform, shape or properties changed since the last call
    pub fn bounding_volume(&self) -> Option<BoundingVolume> {
        let key = (self.revision, self.properties.revision());

        match self.bounds.get() {
            Some(cached) if cached.key == key => cached.volume,
            _ => {
                let volume = self
                    .shape
                    .as_evaluator()
                    .bounding_volume(&self.transform, &self.properties);

                self.bounds.set(Some(CachedBounds { key, volume }));
                volume
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn should_be_exclusive(&self) -> bool {
        self.properties.capture_player_exclusive()
    }

    pub fn shape(&self) -> &FieldShape {
        &self.shape
    }

    pub fn modify_shape<F, R>(&mut self, callback: F) -> R
    where
        F: FnOnce(&mut FieldShape) -> R,
    {
        self.revision += 1;
        let result = callback(&mut self.shape);

        self.enforce_inversion_support();
        result
    }

    pub fn properties(&self) -> &SourceProperties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut SourceProperties {
        &mut self.properties
    }

    /// Flips the source inside out. Shapes that have no inside (planes) keep
    /// pulling toward their surface and the request is ignored.
    pub fn set_inverted(&mut self, inverted: bool) {
        if inverted && !self.shape.supports_inversion() {
            warn!(
                "Ignoring inversion request for {} field source",
                self.shape.kind()
            );
            return;
        }

        self.properties.set_inverted(inverted);
    }

    // Shapes without an inside never keep an inverted flag around
    fn enforce_inversion_support(&mut self) {
        if self.properties.inverted() && !self.shape.supports_inversion() {
            warn!(
                "{} field sources cannot be inverted, clearing flag",
                self.shape.kind()
            );
            self.properties.set_inverted(false);
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.revision += 1;
    }

    pub fn set_position(&mut self, position: impl Into<Vector3<f32>>) {
        self.transform.position = position.into();
        self.revision += 1;
    }

    pub fn set_orientation(&mut self, orientation: Quaternion<f32>) {
        self.transform.orientation = orientation;
        self.revision += 1;
    }

    pub fn modify_transform<F, R>(&mut self, callback: F) -> R
    where
        F: FnOnce(&mut Transform) -> R,
    {
        self.revision += 1;
        callback(&mut self.transform)
    }
}
