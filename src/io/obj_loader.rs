use crate::core::geometry::{Topology, Vertex};
use crate::scene::mesh::Mesh;
use crate::scene::utils::compute_tangents;
use log::{error, info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file and returns a unified triangle-list Mesh with tangents.
///
/// With `flip_axis_and_winding` the Z axis of positions and normals is negated,
/// V is flipped and every triangle's index order is reversed, so assets authored
/// in a right-handed space face the camera in this left-handed pipeline.
pub fn load_obj(path: &str, flip_axis_and_winding: bool) -> Result<Mesh, String> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(format!("File not found: {}", path));
    }

    info!("Loading OBJ file: {}", path);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Important: Unifies indices for Position/Normal/UV
        ..Default::default()
    };

    // Materials come from the scene config, not from MTL files.
    let (models, _materials) = tobj::load_obj(path_obj, &load_options)
        .map_err(|e| format!("Failed to load OBJ: {}", e))?;

    let z_sign = if flip_axis_and_winding { -1.0 } else { 1.0 };
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut index_offset = 0;

    // Iterate over all models found in the OBJ file
    for model in models {
        let mesh = &model.mesh;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = !mesh.normals.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty();

        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Using default (0, 1, 0).",
                model.name
            );
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2] * z_sign,
            );

            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2] * z_sign,
                )
            } else {
                Vector3::y()
            };

            let texcoord = if has_texcoords {
                let (u, v) = (mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]);
                Vector2::new(u, if flip_axis_and_winding { 1.0 - v } else { v })
            } else {
                Vector2::zeros()
            };

            let normal = normal.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::y);
            vertices.push(Vertex::new(position, normal, texcoord));
        }

        // Sub-meshes are merged, so indices are offset by the vertices already added.
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i + index_offset);
            if flip_axis_and_winding {
                indices.extend_from_slice(&[c, b, a]);
            } else {
                indices.extend_from_slice(&[a, b, c]);
            }
        }

        index_offset += num_vertices as u32;
    }

    compute_tangents(&mut vertices, &indices);

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total indices: {}",
        vertices.len(),
        indices.len()
    );

    Ok(Mesh::new(vertices, indices, Topology::TriangleList))
}

/// Like `load_obj`, but logs failures and returns an empty mesh instead.
pub fn load_obj_or_empty(path: &str, flip_axis_and_winding: bool) -> Mesh {
    load_obj(path, flip_axis_and_winding).unwrap_or_else(|e| {
        error!("Error loading model '{}': {}. Rendering nothing for it.", path, e);
        Mesh::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    const TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    fn write_obj(name: &str) -> String {
        let path = std::env::temp_dir().join(format!("dual_rasterizer_{}.obj", name));
        fs::write(&path, TRIANGLE_OBJ).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn plain_load_keeps_axes_and_winding() {
        let path = write_obj("plain");
        let mesh = load_obj(&path, false).unwrap();

        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.topology, Topology::TriangleList);
        assert_relative_eq!(mesh.vertices[0].normal, Vector3::z());
        assert_relative_eq!(mesh.vertices[0].tangent, Vector3::x(), epsilon = 1e-6);
    }

    #[test]
    fn flip_negates_z_flips_v_and_reverses_winding() {
        let path = write_obj("flipped");
        let mesh = load_obj(&path, true).unwrap();

        assert_eq!(mesh.indices, vec![2, 1, 0]);
        assert_relative_eq!(mesh.vertices[0].normal, -Vector3::z());
        assert_relative_eq!(mesh.vertices[0].texcoord, Vector2::new(0.0, 1.0));
        assert_relative_eq!(mesh.vertices[2].texcoord, Vector2::new(0.0, 0.0));
        assert_relative_eq!(mesh.vertices[1].tangent, Vector3::x(), epsilon = 1e-6);
    }

    #[test]
    fn missing_file_becomes_empty_mesh() {
        assert!(load_obj("no/such/model.obj", true).is_err());
        let mesh = load_obj_or_empty("no/such/model.obj", true);
        assert_eq!(mesh.triangle_count(), 0);
    }
}
