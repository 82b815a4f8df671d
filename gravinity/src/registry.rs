//! # Field Registry
//!
//! Owns every live [`FieldSource`] and combines their contributions into a
//! single gravity vector at a query point.
//!
//! Sources are handed out as opaque [`SourceHandle`]s. Handles are never
//! reused, so a handle kept around after its source was unregistered simply
//! stops resolving instead of pointing at some newer source.
//!
//! ## Combination rule
//! Sources are visited in registration order and inactive ones are skipped.
//! Contributions are summed, except that the first exclusive source with a
//! non-zero contribution captures the point: its vector is returned alone and
//! no later source is evaluated.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use cgmath::{Vector3, Zero};
use log::{debug, info};

use crate::FieldSource;

/// Opaque identifier of a source registered in a [`FieldRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceHandle(u64);

impl SourceHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Result of evaluating the field at one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Net field vector. Its magnitude encodes the combined strength.
    pub vector: Vector3<f32>,
    /// The exclusive source that captured the point, if any
    pub captured_by: Option<SourceHandle>,
    /// How many sources contributed a non-zero vector to `vector`
    pub contributors: usize,
}

#[derive(Debug, Default)]
pub struct FieldRegistry {
    next_handle: u64,
    sources: HashMap<SourceHandle, FieldSource>,
    // Registration order
    order: Vec<SourceHandle>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, source: impl Into<FieldSource>) -> SourceHandle {
        let source = source.into();
        let handle = SourceHandle(self.next_handle);
        self.next_handle += 1;

        info!(
            "Registered {} field source {}",
            source.shape().kind(),
            handle.0
        );

        self.sources.insert(handle, source);
        self.order.push(handle);

        handle
    }

    /// Removes a source, handing it back. Unknown handles are ignored.
    pub fn unregister(&mut self, handle: SourceHandle) -> Option<FieldSource> {
        let Some(source) = self.sources.remove(&handle) else {
            debug!(
                "Field source {} is not registered, nothing to remove",
                handle.0
            );
            return None;
        };

        self.order.retain(|registered| *registered != handle);
        info!(
            "Unregistered {} field source {}",
            source.shape().kind(),
            handle.0
        );

        Some(source)
    }

    /// Drops every source. Handles issued so far stay retired.
    pub fn clear(&mut self) {
        info!("Clearing {} field sources", self.order.len());

        self.sources.clear();
        self.order.clear();
    }

    pub fn contains(&self, handle: SourceHandle) -> bool {
        self.sources.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, handle: SourceHandle) -> Option<&FieldSource> {
        self.sources.get(&handle)
    }

    pub fn get_mut(&mut self, handle: SourceHandle) -> Option<&mut FieldSource> {
        self.sources.get_mut(&handle)
    }

    /// Handles in registration order
    pub fn handles(&self) -> impl Iterator<Item = SourceHandle> + '_ {
        self.order.iter().copied()
    }

    /// Sources in registration order
    pub fn iter(&self) -> impl Iterator<Item = (SourceHandle, &FieldSource)> + '_ {
        self.order
            .iter()
            .filter_map(|handle| self.sources.get(handle).map(|source| (*handle, source)))
    }

    pub fn read_source<F, R>(&self, handle: SourceHandle, callback: F) -> Result<R>
    where
        F: FnOnce(&FieldSource) -> R,
    {
        self.sources
            .get(&handle)
            .map(callback)
            .ok_or_else(|| anyhow!("Field source {} is not registered", handle.0))
    }

    pub fn modify_source<F, R>(&mut self, handle: SourceHandle, callback: F) -> Result<R>
    where
        F: FnOnce(&mut FieldSource) -> R,
    {
        self.sources
            .get_mut(&handle)
            .map(callback)
            .ok_or_else(|| anyhow!("Field source {} is not registered", handle.0))
    }

    pub fn set_active(&mut self, handle: SourceHandle, active: bool) -> Result<()> {
        self.modify_source(handle, |source| source.set_active(active))?;
        debug!("Field source {} active: {}", handle.0, active);

        Ok(())
    }

    /// Net gravity at `point`
    pub fn evaluate_at(&self, point: Vector3<f32>) -> Vector3<f32> {
        self.sample_at(point).vector
    }

    pub fn sample_at(&self, point: Vector3<f32>) -> FieldSample {
        let mut sample = FieldSample {
            vector: Vector3::zero(),
            captured_by: None,
            contributors: 0,
        };

        for (handle, source) in self.iter() {
            if !source.is_active() {
                continue;
            }

            let contribution = source.evaluate(point);
            if contribution.is_zero() {
                continue;
            }

            if source.should_be_exclusive() {
                return FieldSample {
                    vector: contribution,
                    captured_by: Some(handle),
                    contributors: 1,
                };
            }

            sample.vector += contribution;
            sample.contributors += 1;
        }

        sample
    }
}
