use glam::{Mat4, Vec3};

/// Orbit radius of the per-frame camera path, in world units.
pub const ORBIT_RADIUS: f32 = 15.0;
/// Fixed camera height while orbiting.
pub const ORBIT_HEIGHT: f32 = 15.0;
/// Angle advance per frame; cosmetic slow rotation, not interactive.
pub const ORBIT_STEP: f32 = 0.003;

const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 3.0, 0.0);

/// Perspective camera orbiting the bar chart at a fixed radius.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    angle: f32,
}

impl OrbitCamera {
    /// Camera as first attached: eye on the diagonal looking at the origin.
    #[must_use]
    pub fn new(aspect: f32) -> Self {
        Self {
            fov_y_degrees: 75.0,
            aspect: aspect.max(f32::EPSILON),
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(15.0, 15.0, 15.0),
            target: Vec3::ZERO,
            angle: 0.0,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(f32::EPSILON);
    }

    /// Advances the slow orbit by one frame and re-aims slightly above the
    /// ground plane.
    pub fn advance_orbit(&mut self) {
        self.angle += ORBIT_STEP;
        self.position = Vec3::new(
            ORBIT_RADIUS * self.angle.cos(),
            ORBIT_HEIGHT,
            ORBIT_RADIUS * self.angle.sin(),
        );
        self.target = ORBIT_TARGET;
    }

    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::{OrbitCamera, ORBIT_RADIUS, ORBIT_STEP};
    use approx::assert_relative_eq;

    #[test]
    fn orbit_keeps_a_fixed_radius_in_the_ground_plane() {
        let mut camera = OrbitCamera::new(1.6);
        for _ in 0..500 {
            camera.advance_orbit();
        }
        let radius = (camera.position.x.powi(2) + camera.position.z.powi(2)).sqrt();
        assert_relative_eq!(radius, ORBIT_RADIUS, epsilon = 1e-3);
        assert_relative_eq!(camera.angle(), 500.0 * ORBIT_STEP, epsilon = 1e-4);
    }
}
