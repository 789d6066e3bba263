use crate::core::color::pack_rgb;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Color and depth storage for one frame.
///
/// The rasterizer borrows it mutably for the whole frame, so depth testing and
/// color writes need no synchronization.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    /// Row-major `0xAARRGGBB` pixels.
    pub color_buffer: Vec<u32>,
    /// Row-major non-linear depth, `+inf` when nothing was drawn.
    pub depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            color_buffer: vec![0; size],
            depth_buffer: vec![f32::INFINITY; size],
        }
    }

    /// Reallocates both buffers for a new surface size. Contents are discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width == width && self.height == height {
            return;
        }
        *self = Self::new(width, height);
    }

    /// Fills the color buffer with `color` and resets every depth cell.
    pub fn clear(&mut self, color: Vector3<f32>, depth: f32) {
        let packed = pack_rgb(color);
        self.color_buffer.par_iter_mut().for_each(|p| *p = packed);
        self.depth_buffer.par_iter_mut().for_each(|d| *d = depth);
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Depth test and update.
    ///
    /// Returns true and stores `new_depth` only when it is strictly closer than the
    /// stored value; equal depths keep the earlier writer.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, y: usize, new_depth: f32) -> bool {
        let idx = self.index(x, y);
        // NaN compares false and is rejected as well.
        if !(new_depth < self.depth_buffer[idx]) {
            return false;
        }
        self.depth_buffer[idx] = new_depth;
        true
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Vector3<f32>) {
        let idx = self.index(x, y);
        self.color_buffer[idx] = pack_rgb(color);
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)])
    }

    pub fn get_depth(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_accepts_only_strictly_closer() {
        let mut fb = FrameBuffer::new(4, 4);
        assert!(fb.depth_test_and_update(1, 1, 0.5));
        assert!(!fb.depth_test_and_update(1, 1, 0.5));
        assert!(!fb.depth_test_and_update(1, 1, 0.7));
        assert!(fb.depth_test_and_update(1, 1, 0.2));
        assert!(!fb.depth_test_and_update(1, 1, f32::NAN));
        assert_eq!(fb.get_depth(1, 1), Some(0.2));
    }

    #[test]
    fn clear_resets_depth_and_color() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.depth_test_and_update(0, 0, 0.1);
        fb.set_pixel(0, 0, Vector3::new(1.0, 0.0, 0.0));

        fb.clear(Vector3::new(0.0, 0.0, 1.0), f32::INFINITY);

        assert_eq!(fb.get_pixel(0, 0), Some(0xFF0000FF));
        assert_eq!(fb.get_depth(0, 0), Some(f32::INFINITY));
        assert_eq!(fb.get_pixel(3, 0), None);
    }

    #[test]
    fn resize_reallocates_buffers() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(8, 5);
        assert_eq!(fb.color_buffer.len(), 40);
        assert_eq!(fb.depth_buffer.len(), 40);
        assert_eq!(fb.get_depth(7, 4), Some(f32::INFINITY));
    }
}
