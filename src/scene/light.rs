use nalgebra::Vector3;
use serde::Deserialize;

/// A light infinitely far away; all rays are parallel.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// Direction the light travels. Used as given, without normalization, so its
    /// length scales the observed area.
    pub direction: Vector3<f32>,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, intensity: f32) -> Self {
        Self {
            direction,
            intensity,
        }
    }

    /// Calculates the direction vector FROM the surface TO the light source.
    pub fn direction_to_light(&self) -> Vector3<f32> {
        -self.direction
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vector3::new(0.577, -0.577, 0.577), 7.0)
    }
}

/// Scene-wide constants of the Phong model.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LightingParams {
    /// Multiplied by the gloss map to form the specular exponent.
    pub shininess: f32,
    pub ambient: [f32; 3],
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            shininess: 25.0,
            ambient: [0.025, 0.025, 0.025],
        }
    }
}

impl LightingParams {
    pub fn ambient_color(&self) -> Vector3<f32> {
        Vector3::from(self.ambient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_direction_is_kept_unnormalized() {
        let light = DirectionalLight::default();
        assert_eq!(light.direction, Vector3::new(0.577, -0.577, 0.577));
        assert_eq!(light.direction_to_light(), Vector3::new(-0.577, 0.577, -0.577));
    }
}
