use cgmath::{Vector3, Zero};

#[derive(Debug, Clone)]
pub struct PointMass {
    pub label: &'static str,

    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub acceleration: Vector3<f32>,

    pub mass: f32,
}

impl PointMass {
    pub fn new(label: &'static str, position: impl Into<Vector3<f32>>, mass: f32) -> Self {
        Self {
            label,
            position: position.into(),
            velocity: Vector3::zero(),
            acceleration: Vector3::zero(),

            mass,
        }
    }

    #[inline]
    fn update_with_acceleration(&mut self, timestep: f32) {
        // v = v_0 + a * t
        self.velocity += self.acceleration * timestep;

        // x = x_0 + v * t
        self.position += self.velocity * timestep;
    }

    /// Field vectors are accelerations, so mass does not scale them
    pub fn apply_acceleration(&mut self, acceleration: Vector3<f32>, timestep: f32) {
        if self.mass == 0.0 {
            return;
        }

        self.acceleration = acceleration;

        self.update_with_acceleration(timestep);
    }
}
