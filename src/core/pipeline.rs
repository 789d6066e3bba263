use crate::core::geometry::VertexOut;
use nalgebra::Vector3;
use std::ops::{Add, Mul};

/// Trait for values that can be interpolated across a triangle's surface.
///
/// Requirements:
/// - Copy: cheap per-vertex duplication.
/// - Add + Mul<f32>: linear combination used by the weighted sums.
pub trait Interpolatable: Copy + Add<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Interpolatable for T where T: Copy + Add<Output = T> + Mul<f32, Output = T> {}

/// The per-pixel stage of the pipeline.
///
/// The rasterizer hands every fragment that survived the depth test to `shade`
/// and stores the returned color after clamping it to [0, 1].
pub trait PixelShader {
    /// Computes the RGB color of one interpolated fragment.
    ///
    /// `fragment.position` carries raster x/y, the non-linear depth in z and the
    /// linear depth in w. Normal, tangent and view direction are unit length.
    fn shade(&self, fragment: &VertexOut) -> Vector3<f32>;
}
