use cgmath::{Deg, InnerSpace, Quaternion, Rotation3};
use gravinity::{FieldRegistry, FieldSourceBuilder, SharedFieldRegistry};
use log::info;

use point_mass::PointMass;
use simulation::{DEFAULT_TICKRATE, DEFAULT_TICKS, Simulation};

mod point_mass;
mod simulation;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let mut registry = FieldRegistry::new();

    let planet = registry.register(
        FieldSourceBuilder::spherical()
            .range(30.0)
            .falloff_distance(8.0)
            .strength(9.81),
    );

    // Small moon that takes over anything close enough to feel it
    registry.register(
        FieldSourceBuilder::spherical()
            .position([40.0, 0.0, 0.0])
            .range(12.0)
            .falloff_distance(4.0)
            .strength(1.62)
            .exclusive(true),
    );

    // Hollow station: walkable on the inside of its shell
    registry.register(
        FieldSourceBuilder::spherical()
            .position([0.0, 100.0, 0.0])
            .inverted(true)
            .inverted_surface_radius(15.0)
            .range(5.0)
            .falloff_distance(3.0)
            .strength(4.0),
    );

    registry.register(
        FieldSourceBuilder::cuboid([6.0, 2.0, 6.0])
            .position([-30.0, 10.0, 0.0])
            .orientation(Quaternion::from_angle_y(Deg(45.0)))
            .range(6.0)
            .falloff_distance(2.0)
            .strength(3.0),
    );

    registry.register(
        FieldSourceBuilder::planar([20.0, 20.0])
            .position([0.0, -60.0, 0.0])
            .range(10.0)
            .falloff_distance(4.0),
    );

    info!("Registered {} field sources", registry.len());

    let registry = SharedFieldRegistry::new(registry);

    let bodies = vec![
        PointMass::new("orbiter", [0.0, 25.0, 0.0], 1.0),
        PointMass::new("moon lander", [40.0, 8.0, 0.0], 1.0),
        PointMass::new("station crew", [0.0, 104.0, 0.0], 1.0),
        PointMass::new("crate", [-30.0, 15.0, 0.0], 1.0),
        PointMass::new("skydiver", [0.0, -52.0, 0.0], 1.0),
    ];

    let simulation = Simulation::new(registry.clone(), bodies)
        .tickrate(DEFAULT_TICKRATE)
        .ticks(DEFAULT_TICKS)
        .spawn();

    // Switch the planet off halfway through
    std::thread::sleep(DEFAULT_TICKRATE * (DEFAULT_TICKS / 2));
    registry.write(|registry| registry.set_active(planet, false))?;
    info!("Planet gravity disabled");

    let bodies = simulation
        .join()
        .map_err(|_| anyhow::anyhow!("Simulation thread panicked"))?;

    for body in bodies.iter() {
        info!(
            "{} ended at ({:.2}, {:.2}, {:.2}) moving at {:.2}",
            body.label,
            body.position.x,
            body.position.y,
            body.position.z,
            body.velocity.magnitude()
        );
    }

    Ok(())
}
