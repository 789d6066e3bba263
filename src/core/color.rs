use nalgebra::Vector3;

/// Packs a linear [0, 1] RGB color into a `0xAARRGGBB` pixel.
///
/// Channels above 1 are clamped to exactly 1 rather than tone mapped.
#[inline]
pub fn pack_rgb(color: Vector3<f32>) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0) as u32;
    (255 << 24) | (r << 16) | (g << 8) | b
}

/// Splits a packed pixel into its 8-bit RGB channels.
#[inline]
pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

/// Linearly remaps `value` from [min, max] to [0, 1], clamped.
#[inline]
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_clamps_overbright_channels() {
        let pixel = pack_rgb(Vector3::new(3.5, 0.5, -1.0));
        assert_eq!(unpack_rgb(pixel), [255, 127, 0]);
        assert_eq!(pixel >> 24, 0xFF);
    }

    #[test]
    fn remap_clamps_outside_range() {
        assert_eq!(remap(0.5, 0.997, 1.0), 0.0);
        assert_eq!(remap(2.0, 0.997, 1.0), 1.0);
    }
}
