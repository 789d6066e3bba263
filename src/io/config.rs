use crate::pipeline::settings::{LightingMode, RasterizerMode, RenderSettings};
use crate::scene::texture::SampleFilter;
use nalgebra::Vector3;
use serde::Deserialize;
use std::f32::consts::FRAC_PI_4;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default = "default_objects")]
    pub objects: Vec<ObjectConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            render: RenderConfig::default(),
            light: LightConfig::default(),
            objects: default_objects(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Initial toggle state for the first frame.
    pub fn initial_settings(&self) -> RenderSettings {
        let r = &self.render;
        RenderSettings {
            rasterizer_mode: r.rasterizer_mode,
            rotate: r.rotate,
            show_auxiliary: r.show_auxiliary,
            sample_filter: r.sample_filter,
            lighting_mode: r.lighting_mode,
            normal_mapping: r.normal_mapping,
            show_depth_buffer: false,
            show_bounding_boxes: false,
            use_uniform_clear_color: r.use_uniform_clear_color,
            print_fps: r.print_fps,
            software_clear_color: Vector3::from(r.clear_color),
            uniform_clear_color: Vector3::from(r.uniform_clear_color),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_target_fps")]
    pub target_fps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            target_fps: default_target_fps(),
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_title() -> String {
    "Dual Rasterizer".to_string()
}
fn default_target_fps() -> usize {
    60
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub position: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "default_rotate_speed")]
    pub rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            move_speed: default_move_speed(),
            rotate_speed: default_rotate_speed(),
        }
    }
}

fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_move_speed() -> f32 {
    10.0
}
fn default_rotate_speed() -> f32 {
    0.005
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    // --- Initial toggles ---
    #[serde(default)]
    pub rasterizer_mode: RasterizerMode,
    #[serde(default)]
    pub lighting_mode: LightingMode,
    #[serde(default)]
    pub sample_filter: SampleFilter,
    #[serde(default = "default_true")]
    pub normal_mapping: bool,
    #[serde(default = "default_true")]
    pub rotate: bool,
    #[serde(default = "default_true")]
    pub show_auxiliary: bool,
    #[serde(default)]
    pub print_fps: bool,

    // --- Background ---
    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 3],
    #[serde(default = "default_uniform_clear_color")]
    pub uniform_clear_color: [f32; 3],
    #[serde(default)]
    pub use_uniform_clear_color: bool,

    // --- Headless output ---
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rasterizer_mode: RasterizerMode::default(),
            lighting_mode: LightingMode::default(),
            sample_filter: SampleFilter::default(),
            normal_mapping: true,
            rotate: true,
            show_auxiliary: true,
            print_fps: false,
            clear_color: default_clear_color(),
            uniform_clear_color: default_uniform_clear_color(),
            use_uniform_clear_color: false,
            output: default_output(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_clear_color() -> [f32; 3] {
    [0.39, 0.39, 0.39]
}
fn default_uniform_clear_color() -> [f32; 3] {
    [0.1, 0.1, 0.1]
}
fn default_output() -> String {
    "output.png".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    /// Direction the light travels.
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
    #[serde(default = "default_ambient")]
    pub ambient: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            intensity: default_light_intensity(),
            shininess: default_shininess(),
            ambient: default_ambient(),
        }
    }
}

fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, 0.577]
}
fn default_light_intensity() -> f32 {
    7.0
}
fn default_shininess() -> f32 {
    25.0
}
fn default_ambient() -> [f32; 3] {
    [0.025, 0.025, 0.025]
}

#[derive(Debug, Deserialize)]
pub struct ObjectConfig {
    pub path: String,

    // --- Placement ---
    #[serde(default = "default_object_position")]
    pub position: [f32; 3],
    /// Radians per second about Y while rotation is on.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    #[serde(default)]
    pub auxiliary: bool,
    #[serde(default = "default_true")]
    pub flip_axis_and_winding: bool,

    // --- Material Textures ---
    pub diffuse_texture: Option<String>,
    pub normal_texture: Option<String>,
    pub gloss_texture: Option<String>,
    pub specular_texture: Option<String>,
}

fn default_object_position() -> [f32; 3] {
    [0.0, 0.0, 50.0]
}
fn default_rotation_speed() -> f32 {
    FRAC_PI_4
}

fn default_objects() -> Vec<ObjectConfig> {
    vec![
        ObjectConfig {
            path: "resources/vehicle.obj".to_string(),
            position: default_object_position(),
            rotation_speed: default_rotation_speed(),
            auxiliary: false,
            flip_axis_and_winding: true,
            diffuse_texture: Some("resources/vehicle_diffuse.png".to_string()),
            normal_texture: Some("resources/vehicle_normal.png".to_string()),
            gloss_texture: Some("resources/vehicle_gloss.png".to_string()),
            specular_texture: Some("resources/vehicle_specular.png".to_string()),
        },
        ObjectConfig {
            path: "resources/fireFX.obj".to_string(),
            position: default_object_position(),
            rotation_speed: default_rotation_speed(),
            auxiliary: true,
            flip_axis_and_winding: true,
            diffuse_texture: Some("resources/fireFX_diffuse.png".to_string()),
            normal_texture: None,
            gloss_texture: None,
            specular_texture: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_classic_scene() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.camera.fov, 45.0);
        assert_eq!(config.objects.len(), 2);
        assert_eq!(config.objects[0].position, [0.0, 0.0, 50.0]);
        assert!(config.objects[1].auxiliary);
    }

    #[test]
    fn partial_sections_keep_field_defaults() {
        let config = Config::from_toml(
            r#"
            [render]
            lighting_mode = "observed_area"
            sample_filter = "linear"

            [[objects]]
            path = "quad.obj"
            auxiliary = true
            "#,
        )
        .unwrap();

        let settings = config.initial_settings();
        assert_eq!(settings.lighting_mode, LightingMode::ObservedArea);
        assert_eq!(settings.sample_filter, SampleFilter::Linear);
        assert!(settings.normal_mapping);
        assert_eq!(config.objects.len(), 1);
        assert!(config.objects[0].flip_axis_and_winding);
        assert_eq!(config.objects[0].rotation_speed, FRAC_PI_4);
        assert_eq!(config.light.intensity, 7.0);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = Config::from_toml("[window\nwidth = 3").unwrap_err();
        assert!(err.starts_with("Failed to parse TOML"));
    }
}
