use crate::core::math::transform::TransformFactory;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;
use std::sync::Arc;

/// Represents an instance of a mesh in the scene with its own placement.
pub struct SceneObject {
    pub mesh: Mesh,
    pub material: Arc<Material>,
    pub position: Vector3<f32>,
    /// Radians per second about the Y axis while rotation is enabled.
    pub rotation_speed: f32,
    /// Current rotation about the Y axis in radians.
    pub angle: f32,
    /// Only drawn while auxiliary meshes are switched on.
    pub auxiliary: bool,
}

impl SceneObject {
    pub fn new(mesh: Mesh, material: Arc<Material>, position: Vector3<f32>) -> Self {
        let mut object = Self {
            mesh,
            material,
            position,
            rotation_speed: 0.0,
            angle: 0.0,
            auxiliary: false,
        };
        object.set_angle(0.0);
        object
    }

    /// Rebuilds the world matrix as translation * rotation_y(angle).
    pub fn set_angle(&mut self, angle_rad: f32) {
        self.angle = angle_rad;
        self.mesh.world_matrix =
            TransformFactory::translation(&self.position) * TransformFactory::rotation_y(angle_rad);
    }

    /// Spins the object by `rotation_speed * dt`.
    pub fn advance(&mut self, dt: f32) {
        self.set_angle(self.angle + self.rotation_speed * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector4};
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn world_matrix_rotates_before_translating() {
        let mut obj = SceneObject::new(
            Mesh::empty(),
            Arc::new(Material::default()),
            Vector3::new(0.0, 0.0, 50.0),
        );
        obj.set_angle(FRAC_PI_2);

        let p = Point3::new(1.0, 0.0, 0.0).to_homogeneous();
        let world = obj.mesh.world_matrix * p;
        // +X rotated a quarter turn about Y lands on -Z, then moves out to z = 50.
        assert_relative_eq!(world, Vector4::new(0.0, 0.0, 49.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn advance_accumulates_angle() {
        let mut obj = SceneObject::new(Mesh::empty(), Arc::new(Material::default()), Vector3::zeros());
        obj.rotation_speed = 2.0;
        obj.advance(0.25);
        obj.advance(0.25);
        assert_relative_eq!(obj.angle, 1.0);
    }
}
