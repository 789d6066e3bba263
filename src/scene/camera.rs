use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};
use std::f32::consts::FRAC_PI_2;

/// Movement and rotation gathered from the input devices for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraInput {
    /// Desired motion along the camera's (right, up, forward) axes, each in [-1, 1].
    pub movement: Vector3<f32>,
    /// Accumulated horizontal rotation input (e.g. mouse pixels).
    pub yaw_delta: f32,
    /// Accumulated vertical rotation input; positive looks up.
    pub pitch_delta: f32,
}

/// First-person camera in a left-handed world (+Z forward, +Y up).
///
/// Manages the View and Projection matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    pub origin: Point3<f32>,
    pub fov_y_rad: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    // --- Orientation ---
    pub yaw: f32,
    pub pitch: f32,
    pub forward: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,

    // --- Controls ---
    /// World units per second.
    pub move_speed: f32,
    /// Radians per unit of rotation input.
    pub rotate_speed: f32,

    // --- Cached Matrices ---
    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new(origin: Point3<f32>, fov_y_rad: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            origin,
            fov_y_rad,
            aspect_ratio,
            near,
            far,
            yaw: 0.0,
            pitch: 0.0,
            forward: Vector3::z(),
            right: Vector3::x(),
            up: Vector3::y(),
            move_speed: 10.0,
            rotate_speed: 0.005,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Advances the camera by one frame of input and refreshes its matrices.
    pub fn update(&mut self, dt: f32, input: &CameraInput) {
        self.yaw += input.yaw_delta * self.rotate_speed;
        self.pitch = (self.pitch + input.pitch_delta * self.rotate_speed)
            .clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);

        // Orientation first, so movement follows the freshly rotated axes.
        self.update_orientation();

        let local = input.movement;
        let offset = self.right * local.x + self.up * local.y + self.forward * local.z;
        if offset.norm_squared() > 1e-6 {
            self.origin += offset.normalize() * self.move_speed * dt;
        }

        self.update_matrices();
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.update_matrices();
    }

    fn update_orientation(&mut self) {
        self.forward = Vector3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize();
        self.right = Vector3::y().cross(&self.forward).normalize();
        self.up = self.forward.cross(&self.right);
    }

    /// Recalculates View and Projection matrices based on current parameters.
    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::view(&self.origin, &self.forward, &Vector3::y());
        self.projection_matrix =
            TransformFactory::perspective(self.aspect_ratio, self.fov_y_rad, self.near, self.far);
    }

    /// Model-to-clip transform for a mesh with the given world matrix.
    pub fn world_view_projection(&self, world: &Matrix4<f32>) -> Matrix4<f32> {
        self.projection_matrix * self.view_matrix * world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    #[test]
    fn world_view_projection_keeps_view_depth_in_w() {
        let cam = Camera::new(Point3::new(0.0, 0.0, -5.0), 90f32.to_radians(), 1.0, 0.1, 100.0);
        let world = Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0));

        let clip = cam.world_view_projection(&world) * Vector4::new(0.0, 0.0, 0.0, 1.0);

        assert_relative_eq!(clip.w, 5.0, epsilon = 1e-5);
        // 90 degree field of view: one unit right at depth 5 lands at NDC x = 0.2.
        assert_relative_eq!(clip.x / clip.w, 0.2, epsilon = 1e-5);
        assert_relative_eq!(clip.y, 0.0, epsilon = 1e-6);
        assert!((0.0..1.0).contains(&(clip.z / clip.w)));
    }

    #[test]
    fn forward_movement_follows_view_direction() {
        let mut cam = Camera::new(Point3::origin(), 45f32.to_radians(), 1.0, 0.1, 100.0);
        cam.move_speed = 2.0;

        cam.update(
            0.5,
            &CameraInput {
                movement: Vector3::new(0.0, 0.0, 1.0),
                ..Default::default()
            },
        );

        assert_relative_eq!(cam.origin, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn yaw_turns_towards_positive_x() {
        let mut cam = Camera::new(Point3::origin(), 45f32.to_radians(), 1.0, 0.1, 100.0);
        cam.rotate_speed = 1.0;

        cam.update(
            0.0,
            &CameraInput {
                yaw_delta: FRAC_PI_2,
                ..Default::default()
            },
        );

        assert_relative_eq!(cam.forward, Vector3::x(), epsilon = 1e-5);
        assert_relative_eq!(cam.right, -Vector3::z(), epsilon = 1e-5);
    }

    #[test]
    fn pitch_is_clamped_short_of_vertical() {
        let mut cam = Camera::new(Point3::origin(), 45f32.to_radians(), 1.0, 0.1, 100.0);
        cam.rotate_speed = 1.0;

        cam.update(
            0.0,
            &CameraInput {
                pitch_delta: 10.0,
                ..Default::default()
            },
        );

        assert!(cam.pitch < FRAC_PI_2);
        assert!(cam.forward.iter().all(|c| c.is_finite()));
    }
}
