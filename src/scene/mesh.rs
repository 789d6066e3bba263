use crate::core::geometry::{Topology, Vertex, VertexOut};
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// A collection of vertices and indices representing a 3D object.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Unique vertices of the mesh.
    pub vertices: Vec<Vertex>,
    /// Indices into `vertices`, interpreted according to `topology`.
    pub indices: Vec<u32>,
    pub topology: Topology,
    /// Model-to-world transform.
    pub world_matrix: Matrix4<f32>,
    /// Output of the last vertex transform pass, one entry per vertex.
    pub vertices_out: Vec<VertexOut>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: Topology) -> Self {
        Self {
            vertices,
            indices,
            topology,
            world_matrix: Matrix4::identity(),
            vertices_out: Vec::new(),
        }
    }

    /// A mesh without geometry; renders zero triangles.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Topology::TriangleList)
    }

    /// Number of triangles the index buffer describes, degenerate ones included.
    pub fn triangle_count(&self) -> usize {
        let n = self.indices.len();
        if n < 3 {
            return 0;
        }
        match self.topology {
            Topology::TriangleList => n / 3,
            Topology::TriangleStrip => n - 2,
        }
    }

    /// Creates an axis-aligned quad in the XY plane facing -Z (towards a camera
    /// at the origin looking down +Z), centred on the origin.
    ///
    /// Built as a 4-vertex triangle strip; both triangles wind clockwise on screen.
    pub fn create_quad(half_size: f32) -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::new(1.0, 0.0, 0.0);
        let s = half_size;
        let vertices = vec![
            Vertex::new(Point3::new(-s, s, 0.0), normal, Vector2::new(0.0, 0.0)).with_tangent(tangent),
            Vertex::new(Point3::new(s, s, 0.0), normal, Vector2::new(1.0, 0.0)).with_tangent(tangent),
            Vertex::new(Point3::new(-s, -s, 0.0), normal, Vector2::new(0.0, 1.0)).with_tangent(tangent),
            Vertex::new(Point3::new(s, -s, 0.0), normal, Vector2::new(1.0, 1.0)).with_tangent(tangent),
        ];

        Self::new(vertices, vec![0, 1, 2, 3], Topology::TriangleStrip)
    }
}
