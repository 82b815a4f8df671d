use std::{
    thread::JoinHandle,
    time::{Duration, Instant},
};

use gravinity::SharedFieldRegistry;
use log::{debug, info};

use crate::point_mass::PointMass;

pub const DEFAULT_TICKRATE: Duration = Duration::from_millis(20);
pub const DEFAULT_TICKS: u32 = 250;

/// Steps point masses through the shared gravity field at a fixed rate on
/// its own thread
pub struct Simulation {
    registry: SharedFieldRegistry,
    bodies: Vec<PointMass>,
    tickrate: Duration,
    ticks: u32,
}

impl Simulation {
    pub fn new(registry: SharedFieldRegistry, bodies: Vec<PointMass>) -> Self {
        Self {
            registry,
            bodies,
            tickrate: DEFAULT_TICKRATE,
            ticks: DEFAULT_TICKS,
        }
    }

    pub fn tickrate(mut self, tickrate: Duration) -> Self {
        self.tickrate = tickrate;
        self
    }

    pub fn ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks;
        self
    }

    /// Advances every body by one fixed step
    pub fn step(&mut self) {
        let timestep = self.tickrate.as_secs_f32();

        for body in self.bodies.iter_mut() {
            let sample = self.registry.read(|registry| registry.sample_at(body.position));
            body.apply_acceleration(sample.vector, timestep);

            debug!(
                "{}: position {:?} gravity {:?} captured by {:?}",
                body.label,
                body.position,
                sample.vector,
                sample.captured_by.map(|handle| handle.id())
            );
        }
    }

    pub fn spawn(mut self) -> JoinHandle<Vec<PointMass>> {
        std::thread::spawn(move || {
            info!(
                "Starting simulation thread with {} bodies",
                self.bodies.len()
            );

            for tick in 0..self.ticks {
                let started = Instant::now();
                self.step();

                if tick % 50 == 0 {
                    for body in self.bodies.iter() {
                        info!(
                            "tick {}: {} at ({:.2}, {:.2}, {:.2})",
                            tick, body.label, body.position.x, body.position.y, body.position.z
                        );
                    }
                }

                if let Some(remaining) = self.tickrate.checked_sub(started.elapsed()) {
                    std::thread::sleep(remaining);
                }
            }

            info!("Simulation finished after {} ticks", self.ticks);
            self.bodies
        })
    }
}
