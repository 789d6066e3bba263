use crate::pipeline::settings::RenderSettings;
use crate::scene::camera::CameraInput;

/// Everything a backend needs to advance one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    pub camera: CameraInput,
}

/// A renderer that can draw the shared scene into a presentation surface.
pub trait RenderBackend {
    fn name(&self) -> &'static str;

    /// Advances animation and camera state.
    fn update(&mut self, input: &FrameInput, settings: &RenderSettings);

    /// Draws the current scene into the backend's own buffers.
    fn render(&mut self, settings: &RenderSettings);

    /// Copies the finished frame into a row-major `0xAARRGGBB` surface.
    fn present(&self, surface: &mut [u32]);

    fn resize(&mut self, width: usize, height: usize);
}
