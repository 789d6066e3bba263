use image::{Rgb, RgbImage};
use log::info;
use nalgebra::{Vector2, Vector3};
use serde::Deserialize;
use std::path::Path;

/// Texture filtering used by `Texture::sample`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFilter {
    /// Nearest texel.
    #[default]
    Point,
    /// Bilinear blend of the four nearest texels.
    Linear,
}

impl SampleFilter {
    pub fn next(self) -> Self {
        match self {
            SampleFilter::Point => SampleFilter::Linear,
            SampleFilter::Linear => SampleFilter::Point,
        }
    }
}

/// Represents a 2D texture map with repeat addressing.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .map_err(|e| format!("Failed to load texture {:?}: {}", path_ref, e))?
            .to_rgb8();

        info!("Loaded texture: {:?} ({}x{})", path_ref, img.width(), img.height());
        Ok(Self::from_image(img))
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// A 1x1 texture that samples to `color` everywhere.
    pub fn solid(color: Vector3<f32>) -> Self {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::from_image(RgbImage::from_pixel(
            1,
            1,
            Rgb([to_u8(color.x), to_u8(color.y), to_u8(color.z)]),
        ))
    }

    /// Samples the texture; each channel is returned in [0, 1].
    ///
    /// UV (0, 0) is the top-left texel. Coordinates outside [0, 1] wrap around.
    pub fn sample(&self, uv: Vector2<f32>, filter: SampleFilter) -> Vector3<f32> {
        match filter {
            SampleFilter::Point => self.sample_point(uv),
            SampleFilter::Linear => self.sample_linear(uv),
        }
    }

    fn sample_point(&self, uv: Vector2<f32>) -> Vector3<f32> {
        let x = (uv.x * self.width as f32).floor() as i32;
        let y = (uv.y * self.height as f32).floor() as i32;
        self.get_pixel_wrapped(x, y)
    }

    fn sample_linear(&self, uv: Vector2<f32>) -> Vector3<f32> {
        // -0.5 because pixel centers are at 0.5
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;

        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let wx = x - x.floor();
        let wy = y - y.floor();

        let c00 = self.get_pixel_wrapped(x0, y0);
        let c10 = self.get_pixel_wrapped(x0 + 1, y0);
        let c01 = self.get_pixel_wrapped(x0, y0 + 1);
        let c11 = self.get_pixel_wrapped(x0 + 1, y0 + 1);

        let top = c00 * (1.0 - wx) + c10 * wx;
        let bottom = c01 * (1.0 - wx) + c11 * wx;
        top * (1.0 - wy) + bottom * wy
    }

    /// Helper to get pixel with WRAPPING (Repeat) logic
    fn get_pixel_wrapped(&self, x: i32, y: i32) -> Vector3<f32> {
        let x_wrapped = x.rem_euclid(self.width as i32);
        let y_wrapped = y.rem_euclid(self.height as i32);

        let pixel = self.image.get_pixel(x_wrapped as u32, y_wrapped as u32);
        Vector3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}
