use crate::io::config::{Config, ObjectConfig};
use crate::io::obj_loader::load_obj_or_empty;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::light::{DirectionalLight, LightingParams};
use crate::scene::material::Material;
use crate::scene::scene_object::SceneObject;
use log::info;
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

/// Builds the camera from the `[camera]` and `[window]` sections.
pub fn build_camera(config: &Config) -> Camera {
    let cam = &config.camera;
    let aspect_ratio = config.window.width as f32 / config.window.height.max(1) as f32;

    let mut camera = Camera::new(
        Point3::from(cam.position),
        cam.fov.to_radians(),
        aspect_ratio,
        cam.near,
        cam.far,
    );
    camera.move_speed = cam.move_speed;
    camera.rotate_speed = cam.rotate_speed;
    camera
}

/// Loads one configured object. A model that fails to load renders nothing.
pub fn build_scene_object(obj_conf: &ObjectConfig) -> SceneObject {
    let mesh = load_obj_or_empty(&obj_conf.path, obj_conf.flip_axis_and_winding);
    let material = Material::load(
        obj_conf.diffuse_texture.as_deref(),
        obj_conf.normal_texture.as_deref(),
        obj_conf.gloss_texture.as_deref(),
        obj_conf.specular_texture.as_deref(),
    );

    let mut object = SceneObject::new(mesh, Arc::new(material), Vector3::from(obj_conf.position));
    object.rotation_speed = obj_conf.rotation_speed;
    object.auxiliary = obj_conf.auxiliary;
    object
}

/// Initial resource loading (Heavy I/O). Returns a RenderContext.
pub fn init_scene_resources(config: &Config) -> RenderContext {
    let camera = build_camera(config);

    let light = DirectionalLight::new(Vector3::from(config.light.direction), config.light.intensity);
    let lighting = LightingParams {
        shininess: config.light.shininess,
        ambient: config.light.ambient,
    };

    let scene_objects: Vec<SceneObject> = config.objects.iter().map(build_scene_object).collect();

    info!(
        "Scene initialized with {} objects ({} triangles).",
        scene_objects.len(),
        scene_objects
            .iter()
            .map(|o| o.mesh.triangle_count())
            .sum::<usize>()
    );

    RenderContext {
        camera,
        light,
        lighting,
        scene_objects,
    }
}
