use crate::core::geometry::VertexOut;
use crate::core::pipeline::PixelShader;
use crate::pipeline::settings::LightingMode;
use crate::scene::light::{DirectionalLight, LightingParams};
use crate::scene::material::Material;
use crate::scene::texture::SampleFilter;
use nalgebra::{Vector2, Vector3};
use std::f32::consts::PI;

/// Lambert diffuse plus Phong specular under a single directional light.
///
/// Textures supply the albedo, tangent-space normal, gloss and specular terms.
pub struct PhongShader<'a> {
    pub material: &'a Material,
    pub light: DirectionalLight,
    pub lighting: LightingParams,
    pub mode: LightingMode,
    pub normal_mapping: bool,
    pub filter: SampleFilter,
}

impl<'a> PhongShader<'a> {
    pub fn new(material: &'a Material, light: DirectionalLight, lighting: LightingParams) -> Self {
        Self {
            material,
            light,
            lighting,
            mode: LightingMode::default(),
            normal_mapping: true,
            filter: SampleFilter::default(),
        }
    }

    /// Brings the normal-map sample into world space through the TBN basis.
    fn mapped_normal(&self, fragment: &VertexOut, uv: Vector2<f32>) -> Vector3<f32> {
        let tangent = fragment.tangent;
        let normal = fragment.normal;
        let binormal = normal.cross(&tangent);

        let sampled = self.material.normal.sample(uv, self.filter);
        // [0, 1] -> [-1, 1]
        let remapped = sampled * 2.0 - Vector3::new(1.0, 1.0, 1.0);
        let local = remapped.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::z);

        (tangent * local.x + binormal * local.y + normal * local.z)
            .try_normalize(f32::EPSILON)
            .unwrap_or(normal)
    }
}

impl PixelShader for PhongShader<'_> {
    fn shade(&self, fragment: &VertexOut) -> Vector3<f32> {
        let uv = fragment.texcoord;
        let light_dir = self.light.direction;

        let diffuse = self.material.diffuse.sample(uv, self.filter);
        let lambert = diffuse * self.light.intensity / PI;

        let normal = if self.normal_mapping {
            self.mapped_normal(fragment, uv)
        } else {
            fragment.normal
        };

        // Lambert's cosine law
        let observed_area = normal.dot(&self.light.direction_to_light());
        if observed_area < 0.0 {
            return Vector3::zeros();
        }

        // Phong
        let reflect = light_dir - normal * (2.0 * normal.dot(&light_dir));
        let cos_alpha = reflect.dot(&fragment.view_direction).max(0.0);
        let exponent = self.material.gloss.sample(uv, self.filter).x * self.lighting.shininess;
        let specular = self.material.specular.sample(uv, self.filter) * cos_alpha.powf(exponent);

        let observed = Vector3::repeat(observed_area);
        match self.mode {
            LightingMode::ObservedArea => observed,
            LightingMode::Diffuse => observed.component_mul(&lambert),
            LightingMode::Specular => specular,
            LightingMode::Combined => {
                observed.component_mul(&(lambert + specular + self.lighting.ambient_color()))
            }
        }
    }
}
