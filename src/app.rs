use crate::io::config::Config;
use crate::io::image::save_buffer_to_image;
use crate::pipeline::backend::{FrameInput, RenderBackend};
use crate::pipeline::renderer::SoftwareRenderer;
use crate::pipeline::settings::RenderSettings;
use crate::scene::loader::init_scene_resources;
use crate::ui::input::{CameraController, handle_toggle_keys};
use log::{error, info};
use minifb::{Key, Window, WindowOptions};
use std::time::Instant;

/// Fixed timestep used by headless renders, in seconds.
const HEADLESS_DT: f32 = 1.0 / 60.0;

fn window_title(base: &str, backend: &dyn RenderBackend, settings: &RenderSettings, fps: f32) -> String {
    format!(
        "{} - {} - {} - {:.1} FPS",
        base,
        backend.name(),
        settings.lighting_mode,
        fps
    )
}

/// Runs the application in GUI mode with real-time rendering and interactivity.
pub fn run_gui(config: Config) -> Result<(), String> {
    let mut width = config.window.width;
    let mut height = config.window.height;

    info!("Starting GUI mode ({}x{})...", width, height);
    info!(
        "Controls: WASD=Move, Space/LeftShift=Up/Down, LeftDrag=Look, F1-F8/F10/F11=Toggles, Esc=Quit"
    );

    let mut window = Window::new(
        &config.window.title,
        width,
        height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| format!("Failed to create window: {}", e))?;
    window.set_target_fps(config.window.target_fps);

    let mut settings = config.initial_settings();
    let mut backend = SoftwareRenderer::new(width, height, init_scene_resources(&config));
    let mut controller = CameraController::new();
    let mut surface = vec![0u32; width * height];

    let mut last_frame_time = Instant::now();
    let mut frame_count = 0;
    let mut last_fps_update = Instant::now();
    let mut fps = 0.0;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        // --- Resize ---
        let (new_width, new_height) = window.get_size();
        if (new_width, new_height) != (width, height) && new_width > 0 && new_height > 0 {
            width = new_width;
            height = new_height;
            backend.resize(width, height);
            surface = vec![0u32; width * height];
            info!("Resized to {}x{}", width, height);
        }

        // --- Input ---
        handle_toggle_keys(&window, &mut settings);
        let input = FrameInput {
            dt,
            camera: controller.poll(&window),
        };

        // --- Render ---
        backend.update(&input, &settings);
        backend.render(&settings);
        backend.present(&mut surface);

        window
            .update_with_buffer(&surface, width, height)
            .map_err(|e| format!("Failed to present frame: {}", e))?;

        frame_count += 1;
        let elapsed = last_fps_update.elapsed().as_secs_f32();
        if elapsed >= 2.0 {
            fps = frame_count as f32 / elapsed;
            if settings.print_fps {
                info!("Average FPS: {:.1}", fps);
            }
            window.set_title(&window_title(&config.window.title, &backend, &settings, fps));
            frame_count = 0;
            last_fps_update = Instant::now();
        }
    }

    info!("Window closed after {:.1} FPS average in the last interval.", fps);
    Ok(())
}

/// Runs the application headless: renders `frames` frames at a fixed timestep and
/// saves the last one to `output`.
pub fn run_cli(config: Config, frames: usize, output: Option<String>) -> Result<(), String> {
    info!("Starting CLI mode...");
    let width = config.window.width;
    let height = config.window.height;
    let output = output.unwrap_or_else(|| config.render.output.clone());

    let settings = config.initial_settings();
    let mut backend = SoftwareRenderer::new(width, height, init_scene_resources(&config));
    let start_time = Instant::now();

    let input = FrameInput {
        dt: HEADLESS_DT,
        ..Default::default()
    };
    for _ in 0..frames.max(1) {
        backend.update(&input, &settings);
        backend.render(&settings);
    }

    let stats = backend.last_stats();
    info!(
        "Rendered {} frame(s) in {:.2?}; last frame shaded {} fragments from {} triangles.",
        frames.max(1),
        start_time.elapsed(),
        stats.fragments,
        stats.rasterized
    );

    info!("Saving output to '{}'...", output);
    let mut surface = vec![0u32; width * height];
    backend.present(&mut surface);
    save_buffer_to_image(&surface, width, height, &output).inspect_err(|e| error!("{}", e))?;
    info!("Done.");
    Ok(())
}
