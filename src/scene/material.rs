use crate::scene::texture::Texture;
use log::warn;
use nalgebra::Vector3;
use std::path::Path;
use std::sync::Arc;

/// The four texture maps the software pixel shader samples.
#[derive(Debug, Clone)]
pub struct Material {
    /// Albedo.
    pub diffuse: Arc<Texture>,
    /// Tangent-space normals encoded as RGB in [0, 1].
    pub normal: Arc<Texture>,
    /// Red channel scales the Phong exponent.
    pub gloss: Arc<Texture>,
    pub specular: Arc<Texture>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Arc::new(Texture::solid(Vector3::new(0.8, 0.8, 0.8))),
            normal: Arc::new(Texture::solid(Self::FLAT_NORMAL)),
            gloss: Arc::new(Texture::solid(Vector3::new(0.5, 0.5, 0.5))),
            specular: Arc::new(Texture::solid(Vector3::zeros())),
        }
    }
}

impl Material {
    /// Encodes the unperturbed tangent-space normal (0, 0, 1).
    pub const FLAT_NORMAL: Vector3<f32> = Vector3::new(0.5, 0.5, 1.0);

    /// Marks a missing diffuse map so it stands out on screen.
    pub const MISSING_DIFFUSE: Vector3<f32> = Vector3::new(1.0, 0.0, 1.0);

    /// Loads each map that has a path. Unset paths keep the neutral default map;
    /// maps that fail to load are replaced by a solid fallback and logged.
    pub fn load(
        diffuse: Option<&str>,
        normal: Option<&str>,
        gloss: Option<&str>,
        specular: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            diffuse: load_or(diffuse, "diffuse", defaults.diffuse, Self::MISSING_DIFFUSE),
            normal: load_or(normal, "normal", defaults.normal, Self::FLAT_NORMAL),
            gloss: load_or(gloss, "gloss", defaults.gloss, Vector3::new(0.5, 0.5, 0.5)),
            specular: load_or(specular, "specular", defaults.specular, Vector3::zeros()),
        }
    }
}

fn load_or(
    path: Option<&str>,
    slot: &str,
    default: Arc<Texture>,
    fallback: Vector3<f32>,
) -> Arc<Texture> {
    let Some(path) = path else {
        return default;
    };
    match Texture::load(Path::new(path)) {
        Ok(tex) => Arc::new(tex),
        Err(e) => {
            warn!("{}. Using a solid {} map instead.", e, slot);
            Arc::new(Texture::solid(fallback))
        }
    }
}
