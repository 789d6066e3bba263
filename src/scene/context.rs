use crate::scene::camera::Camera;
use crate::scene::light::{DirectionalLight, LightingParams};
use crate::scene::scene_object::SceneObject;

/// Holds all scene resources required for rendering.
pub struct RenderContext {
    pub camera: Camera,
    pub light: DirectionalLight,
    pub lighting: LightingParams,
    pub scene_objects: Vec<SceneObject>,
}
