use crate::core::pipeline::Interpolatable;
use nalgebra::{Point2, Vector2, Vector3};

/// Triangles whose doubled raster-space area is below this are treated as degenerate.
pub const EPSILON: f32 = 1e-5;

/// 2D cross product (z component of the 3D cross product).
#[inline(always)]
pub fn cross(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Doubled signed area of triangle (a, b, c), computed as `(a - b) x (a - c)`.
///
/// Positive for the winding the rasterizer accepts.
#[inline]
pub fn signed_area(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> f32 {
    cross(a - b, a - c)
}

/// Signed parallelogram areas of `p` against each edge of triangle (a, b, c).
///
/// # Returns
/// A Vector3 holding the unnormalized weight of each vertex:
/// - x: edge B→C (weight for a)
/// - y: edge C→A (weight for b)
/// - z: edge A→B (weight for c)
#[inline]
pub fn edge_functions(
    p: Point2<f32>,
    a: Point2<f32>,
    b: Point2<f32>,
    c: Point2<f32>,
) -> Vector3<f32> {
    Vector3::new(cross(p - b, b - c), cross(p - c, c - a), cross(p - a, a - b))
}

/// A pixel is covered only when every edge function is strictly positive.
/// Points exactly on an edge, and triangles of the opposite winding, are rejected.
#[inline(always)]
pub fn is_inside_triangle(edges: Vector3<f32>) -> bool {
    edges.x > 0.0 && edges.y > 0.0 && edges.z > 0.0
}

/// Interpolates a per-vertex depth as the reciprocal of the weighted sum of reciprocals.
///
/// Used both for the non-linear depth (z) and for the linear depth (w).
#[inline]
pub fn interpolate_depth(weights: Vector3<f32>, depths: [f32; 3]) -> f32 {
    1.0 / (weights.x / depths[0] + weights.y / depths[1] + weights.z / depths[2])
}

/// Perspective-correct interpolation of a vertex attribute.
///
/// Each attribute is divided by its vertex's linear depth, weight-summed, then
/// multiplied back by the interpolated linear depth `w`.
#[inline]
pub fn perspective_correct<T: Interpolatable>(
    weights: Vector3<f32>,
    attributes: [T; 3],
    depths: [f32; 3],
    w: f32,
) -> T {
    (attributes[0] * (weights.x / depths[0])
        + attributes[1] * (weights.y / depths[1])
        + attributes[2] * (weights.z / depths[2]))
        * w
}
