use std::sync::Arc;

use cgmath::Vector3;
use parking_lot::Mutex;

use crate::FieldRegistry;

/// A [`FieldRegistry`] that can be handed to a simulation thread while the
/// host keeps registering and toggling sources. Every access takes the lock,
/// so sources never change in the middle of an evaluation.
#[derive(Debug, Default)]
pub struct SharedFieldRegistry(Arc<Mutex<FieldRegistry>>);

impl Clone for SharedFieldRegistry {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl SharedFieldRegistry {
    pub fn new(registry: FieldRegistry) -> Self {
        Self(Arc::new(Mutex::new(registry)))
    }

    pub fn read<F, R>(&self, callback: F) -> R
    where
        F: FnOnce(&FieldRegistry) -> R,
    {
        callback(&self.0.lock())
    }

    pub fn write<F, R>(&self, callback: F) -> R
    where
        F: FnOnce(&mut FieldRegistry) -> R,
    {
        callback(&mut self.0.lock())
    }

    pub fn evaluate_at(&self, point: Vector3<f32>) -> Vector3<f32> {
        self.read(|registry| registry.evaluate_at(point))
    }
}
