use crate::core::geometry::Vertex;
use nalgebra::Vector3;

/// Derives per-vertex tangents from the UV layout of a triangle list.
///
/// Each triangle contributes its UV-space +U direction to its three vertices; the
/// accumulated vectors are then Gram-Schmidt orthogonalized against the vertex
/// normal. Vertices without usable UVs get an arbitrary tangent perpendicular to
/// the normal.
pub fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vector3::<f32>::zeros(); vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0.max(i1).max(i2) >= vertices.len() {
            continue;
        }
        let (v0, v1, v2) = (&vertices[i0], &vertices[i1], &vertices[i2]);

        let edge0 = v1.position - v0.position;
        let edge1 = v2.position - v0.position;
        let diff_x = Vector3::new(
            v1.texcoord.x - v0.texcoord.x,
            v2.texcoord.x - v0.texcoord.x,
            0.0,
        );
        let diff_y = Vector3::new(
            v1.texcoord.y - v0.texcoord.y,
            v2.texcoord.y - v0.texcoord.y,
            0.0,
        );

        let det = diff_x.x * diff_y.y - diff_y.x * diff_x.y;
        if det.abs() < f32::EPSILON {
            continue;
        }
        let tangent = (edge0 * diff_y.y - edge1 * diff_y.x) / det;

        for i in [i0, i1, i2] {
            accumulated[i] += tangent;
        }
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let n = vertex.normal;
        let orthogonal = tangent - n * n.dot(&tangent);
        vertex.tangent = orthogonal
            .try_normalize(1e-6)
            .unwrap_or_else(|| any_perpendicular(&n));
    }
}

fn any_perpendicular(n: &Vector3<f32>) -> Vector3<f32> {
    let axis = if n.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    n.cross(&axis).try_normalize(1e-6).unwrap_or_else(Vector3::x)
}
