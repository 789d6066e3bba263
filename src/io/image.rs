use crate::core::color::unpack_rgb;
use image::{ImageBuffer, Rgb};
use std::path::Path;

/// Saves a row-major `0xAARRGGBB` buffer to an image file (format from the extension).
pub fn save_buffer_to_image(
    buffer: &[u32],
    width: usize,
    height: usize,
    path: &str,
) -> Result<(), String> {
    if buffer.len() != width * height {
        return Err(format!(
            "Buffer holds {} pixels, expected {}x{}",
            buffer.len(),
            width,
            height
        ));
    }

    let img_buf = ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let idx = (y as usize) * width + (x as usize);
        Rgb(unpack_rgb(buffer[idx]))
    });

    img_buf
        .save(Path::new(path))
        .map_err(|e| format!("Failed to save image to '{}': {}", path, e))
}
