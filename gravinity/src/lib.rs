//! # Gravinity - Per Object Directional Gravity
//!
//! Gravity here is not a single world-wide vector. Spheres, boxes and planes
//! placed in the world each pull (or, inverted, push) with their own range,
//! falloff and strength, and a [`FieldRegistry`] combines them into the net
//! gravity felt at any point.
//!
//! ## Key Concepts
//! - **FieldSource**: a shape with a transform and [`SourceProperties`]
//! - **Falloff**: the band inside a source's range over which its strength
//!   fades linearly to nothing
//! - **Exclusive source**: a source whose non-zero pull at a point replaces
//!   every other contribution there
//!
//! ```ignore
//! let mut registry = FieldRegistry::new();
//! registry.register(FieldSourceBuilder::spherical().range(30.0).strength(9.81));
//!
//! let gravity = registry.evaluate_at(body_position);
//! ```

pub use bounds::BoundingVolume;
pub use properties::SourceProperties;
pub use registry::{FieldRegistry, FieldSample, SourceHandle};
pub use shared::SharedFieldRegistry;
pub use source::{
    BoxShape, DEFAULT_FALLOFF_DISTANCE, DEFAULT_RANGE, DEFAULT_STRENGTH, FieldShape, FieldSource,
    FieldSourceBuilder, PlanarShape, SphericalShape,
};
pub use transform::Transform;

mod bounds;
pub mod properties;
mod registry;
mod shared;
mod source;
mod transform;
