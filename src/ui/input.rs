use crate::pipeline::settings::RenderSettings;
use crate::scene::camera::CameraInput;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};
use nalgebra::Vector3;

/// Turns keyboard and mouse state into camera input.
///
/// WASD moves in the view plane, Space/LeftShift move up/down and dragging with
/// the left mouse button rotates.
#[derive(Default)]
pub struct CameraController {
    last_mouse_pos: Option<(f32, f32)>,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, window: &Window) -> CameraInput {
        let axis = |pos: Key, neg: Key| {
            let mut v = 0.0f32;
            if window.is_key_down(pos) {
                v += 1.0;
            }
            if window.is_key_down(neg) {
                v -= 1.0;
            }
            v
        };

        let movement = Vector3::new(
            axis(Key::D, Key::A),
            axis(Key::Space, Key::LeftShift),
            axis(Key::W, Key::S),
        );

        let (mut yaw_delta, mut pitch_delta) = (0.0, 0.0);
        if window.get_mouse_down(MouseButton::Left) {
            if let Some((x, y)) = window.get_mouse_pos(MouseMode::Pass) {
                if let Some((last_x, last_y)) = self.last_mouse_pos {
                    yaw_delta = x - last_x;
                    // Screen y grows downwards; dragging up looks up.
                    pitch_delta = last_y - y;
                }
                self.last_mouse_pos = Some((x, y));
            }
        } else {
            self.last_mouse_pos = None;
        }

        CameraInput {
            movement,
            yaw_delta,
            pitch_delta,
        }
    }
}

/// Applies the function-key toggles pressed since the last frame.
pub fn handle_toggle_keys(window: &Window, settings: &mut RenderSettings) {
    for key in window.get_keys_pressed(KeyRepeat::No) {
        match key {
            Key::F1 => settings.toggle_rasterizer_mode(),
            Key::F2 => settings.toggle_rotation(),
            Key::F3 => settings.toggle_auxiliary(),
            Key::F4 => settings.cycle_sample_filter(),
            Key::F5 => settings.cycle_lighting_mode(),
            Key::F6 => settings.toggle_normal_mapping(),
            Key::F7 => settings.toggle_depth_buffer(),
            Key::F8 => settings.toggle_bounding_boxes(),
            Key::F10 => settings.toggle_uniform_clear_color(),
            Key::F11 => settings.toggle_print_fps(),
            _ => {}
        }
    }
}
