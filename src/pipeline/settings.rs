use crate::scene::texture::SampleFilter;
use log::{info, warn};
use nalgebra::Vector3;
use serde::Deserialize;
use std::fmt;

/// Which backend draws the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterizerMode {
    #[default]
    Software,
    Hardware,
}

/// Which term of the shading model reaches the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
    ObservedArea,
    Diffuse,
    Specular,
    #[default]
    Combined,
}

impl LightingMode {
    /// ObservedArea -> Diffuse -> Specular -> Combined -> ObservedArea.
    pub fn next(self) -> Self {
        match self {
            LightingMode::ObservedArea => LightingMode::Diffuse,
            LightingMode::Diffuse => LightingMode::Specular,
            LightingMode::Specular => LightingMode::Combined,
            LightingMode::Combined => LightingMode::ObservedArea,
        }
    }
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LightingMode::ObservedArea => "Observed Area",
            LightingMode::Diffuse => "Diffuse",
            LightingMode::Specular => "Specular",
            LightingMode::Combined => "Combined",
        };
        f.write_str(name)
    }
}

impl fmt::Display for RasterizerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterizerMode::Software => f.write_str("Software"),
            RasterizerMode::Hardware => f.write_str("Hardware"),
        }
    }
}

/// Runtime toggles, changed between frames and read once at the start of each one.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub rasterizer_mode: RasterizerMode,
    pub rotate: bool,
    pub show_auxiliary: bool,
    pub sample_filter: SampleFilter,
    pub lighting_mode: LightingMode,
    pub normal_mapping: bool,
    pub show_depth_buffer: bool,
    pub show_bounding_boxes: bool,
    pub use_uniform_clear_color: bool,
    pub print_fps: bool,

    pub software_clear_color: Vector3<f32>,
    pub uniform_clear_color: Vector3<f32>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            rasterizer_mode: RasterizerMode::Software,
            rotate: true,
            show_auxiliary: true,
            sample_filter: SampleFilter::Point,
            lighting_mode: LightingMode::Combined,
            normal_mapping: true,
            show_depth_buffer: false,
            show_bounding_boxes: false,
            use_uniform_clear_color: false,
            print_fps: false,
            software_clear_color: Vector3::new(0.39, 0.39, 0.39),
            uniform_clear_color: Vector3::new(0.1, 0.1, 0.1),
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

impl RenderSettings {
    /// Color the software back buffer is cleared to this frame.
    pub fn clear_color(&self) -> Vector3<f32> {
        if self.use_uniform_clear_color {
            self.uniform_clear_color
        } else {
            self.software_clear_color
        }
    }

    pub fn toggle_rasterizer_mode(&mut self) {
        self.rasterizer_mode = match self.rasterizer_mode {
            RasterizerMode::Software => RasterizerMode::Hardware,
            RasterizerMode::Hardware => RasterizerMode::Software,
        };
        info!("Rasterizer mode: {}", self.rasterizer_mode);
        if self.rasterizer_mode == RasterizerMode::Hardware {
            warn!("No hardware backend is available in this build; frames are still rendered in software.");
        }
    }

    pub fn toggle_rotation(&mut self) {
        self.rotate = !self.rotate;
        info!("Rotation: {}", on_off(self.rotate));
    }

    pub fn toggle_auxiliary(&mut self) {
        self.show_auxiliary = !self.show_auxiliary;
        info!("Auxiliary meshes: {}", on_off(self.show_auxiliary));
    }

    pub fn cycle_sample_filter(&mut self) {
        self.sample_filter = self.sample_filter.next();
        info!("Sample filter: {:?}", self.sample_filter);
    }

    pub fn cycle_lighting_mode(&mut self) {
        self.lighting_mode = self.lighting_mode.next();
        info!("Lighting mode: {}", self.lighting_mode);
    }

    pub fn toggle_normal_mapping(&mut self) {
        self.normal_mapping = !self.normal_mapping;
        info!("Normal map: {}", on_off(self.normal_mapping));
    }

    pub fn toggle_depth_buffer(&mut self) {
        self.show_depth_buffer = !self.show_depth_buffer;
        info!("Depth buffer visualization: {}", on_off(self.show_depth_buffer));
    }

    pub fn toggle_bounding_boxes(&mut self) {
        self.show_bounding_boxes = !self.show_bounding_boxes;
        info!("Bounding box visualization: {}", on_off(self.show_bounding_boxes));
    }

    pub fn toggle_uniform_clear_color(&mut self) {
        self.use_uniform_clear_color = !self.use_uniform_clear_color;
        info!("Uniform clear color: {}", on_off(self.use_uniform_clear_color));
    }

    pub fn toggle_print_fps(&mut self) {
        self.print_fps = !self.print_fps;
        info!("Print FPS: {}", on_off(self.print_fps));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighting_mode_cycles_through_all_four() {
        let mut mode = LightingMode::ObservedArea;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(mode, LightingMode::ObservedArea);
        assert_eq!(
            seen,
            vec![
                LightingMode::ObservedArea,
                LightingMode::Diffuse,
                LightingMode::Specular,
                LightingMode::Combined
            ]
        );
    }

    #[test]
    fn uniform_clear_color_switches_the_clear_color() {
        let mut settings = RenderSettings::default();
        assert_eq!(settings.clear_color(), Vector3::new(0.39, 0.39, 0.39));
        settings.toggle_uniform_clear_color();
        assert_eq!(settings.clear_color(), Vector3::new(0.1, 0.1, 0.1));
    }

    #[test]
    fn toggles_flip_back_and_forth() {
        let mut settings = RenderSettings::default();
        settings.toggle_rasterizer_mode();
        assert_eq!(settings.rasterizer_mode, RasterizerMode::Hardware);
        settings.toggle_rasterizer_mode();
        assert_eq!(settings.rasterizer_mode, RasterizerMode::Software);

        settings.cycle_sample_filter();
        assert_eq!(settings.sample_filter, SampleFilter::Linear);
        settings.toggle_normal_mapping();
        assert!(!settings.normal_mapping);
    }
}
