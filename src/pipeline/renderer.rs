use crate::core::framebuffer::FrameBuffer;
use crate::core::rasterizer::{RasterStats, Rasterizer};
use crate::pipeline::backend::{FrameInput, RenderBackend};
use crate::pipeline::passes::render_main_pass;
use crate::pipeline::settings::RenderSettings;
use crate::scene::context::RenderContext;
use log::{debug, warn};

/// The CPU backend: owns the frame buffer and drives the software pipeline.
pub struct SoftwareRenderer {
    pub framebuffer: FrameBuffer,
    pub rasterizer: Rasterizer,
    pub context: RenderContext,
    last_stats: RasterStats,
}

impl SoftwareRenderer {
    pub fn new(width: usize, height: usize, context: RenderContext) -> Self {
        let mut renderer = Self {
            framebuffer: FrameBuffer::new(width, height),
            rasterizer: Rasterizer::new(),
            context,
            last_stats: RasterStats::default(),
        };
        renderer.context.camera.set_aspect_ratio(width as f32 / height.max(1) as f32);
        renderer
    }

    /// Triangle and fragment counters of the most recent `render` call.
    pub fn last_stats(&self) -> RasterStats {
        self.last_stats
    }
}

impl RenderBackend for SoftwareRenderer {
    fn name(&self) -> &'static str {
        "Software"
    }

    fn update(&mut self, input: &FrameInput, settings: &RenderSettings) {
        self.context.camera.update(input.dt, &input.camera);

        if settings.rotate {
            for obj in &mut self.context.scene_objects {
                obj.advance(input.dt);
            }
        }
    }

    fn render(&mut self, settings: &RenderSettings) {
        let stats = render_main_pass(
            &mut self.context,
            settings,
            &mut self.rasterizer,
            &mut self.framebuffer,
        );

        debug!(
            "Frame: {} triangles submitted, {} degenerate, {} culled, {} rasterized, {} fragments",
            stats.submitted, stats.degenerate, stats.culled, stats.rasterized, stats.fragments
        );
        self.last_stats = stats;
    }

    fn present(&self, surface: &mut [u32]) {
        let source = &self.framebuffer.color_buffer;
        if surface.len() != source.len() {
            warn!(
                "Presentation surface holds {} pixels but the frame has {}; skipping present.",
                surface.len(),
                source.len()
            );
            return;
        }
        surface.copy_from_slice(source);
    }

    fn resize(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        self.framebuffer.resize(width, height);
        self.context
            .camera
            .set_aspect_ratio(width as f32 / height as f32);
    }
}
