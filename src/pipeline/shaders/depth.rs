use crate::core::color::remap;
use crate::core::geometry::VertexOut;
use crate::core::pipeline::PixelShader;
use nalgebra::Vector3;

/// Visualizes the non-linear depth buffer as grey levels.
///
/// Perspective depth crowds near 1.0, so only `[near_value, far_value]` is
/// stretched over the visible range.
pub struct DepthShader {
    pub near_value: f32,
    pub far_value: f32,
}

impl Default for DepthShader {
    fn default() -> Self {
        Self {
            near_value: 0.997,
            far_value: 1.0,
        }
    }
}

impl PixelShader for DepthShader {
    fn shade(&self, fragment: &VertexOut) -> Vector3<f32> {
        Vector3::repeat(remap(fragment.position.z, self.near_value, self.far_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    fn at_depth(z: f32) -> VertexOut {
        VertexOut {
            position: Vector4::new(0.0, 0.0, z, 1.0),
            ..Default::default()
        }
    }

    #[test]
    fn depth_is_remapped_to_grey() {
        let shader = DepthShader::default();
        assert_eq!(shader.shade(&at_depth(0.5)), Vector3::zeros());
        assert_relative_eq!(shader.shade(&at_depth(0.9985)).x, 0.5, epsilon = 1e-3);
        assert_eq!(shader.shade(&at_depth(1.0)), Vector3::new(1.0, 1.0, 1.0));
    }
}
