use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// Represents a single vertex in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Texture coordinates (UV).
    pub texcoord: Vector2<f32>,
    /// Unit normal.
    pub normal: Vector3<f32>,
    /// Unit tangent, used to build the tangent-space basis for normal mapping.
    pub tangent: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            texcoord,
            normal,
            tangent: Vector3::zeros(),
        }
    }

    pub fn with_tangent(mut self, tangent: Vector3<f32>) -> Self {
        self.tangent = tangent;
        self
    }
}

/// Output of the vertex stage, and again of the rasterizer for every covered pixel.
///
/// After the vertex stage `position` holds NDC x, y, z and the untouched clip-space w.
/// Once a fragment is produced, x and y are raster coordinates, z the interpolated
/// non-linear depth and w the interpolated linear depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOut {
    pub position: Vector4<f32>,
    pub color: Vector3<f32>,
    pub texcoord: Vector2<f32>,
    /// World-space normal.
    pub normal: Vector3<f32>,
    /// World-space tangent.
    pub tangent: Vector3<f32>,
    /// Camera origin minus world position.
    pub view_direction: Vector3<f32>,
}

impl Default for VertexOut {
    fn default() -> Self {
        Self {
            position: Vector4::zeros(),
            color: Vector3::new(1.0, 1.0, 1.0),
            texcoord: Vector2::zeros(),
            normal: Vector3::zeros(),
            tangent: Vector3::zeros(),
            view_direction: Vector3::zeros(),
        }
    }
}

/// Rule for deriving triangles from an index sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// Independent triplets.
    #[default]
    TriangleList,
    /// Sliding window of three with alternating winding.
    TriangleStrip,
}
