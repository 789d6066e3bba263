use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::VertexOut;
use crate::core::math::transform::apply_perspective_division;
use crate::core::rasterizer::{RasterStats, Rasterizer};
use crate::pipeline::settings::RenderSettings;
use crate::pipeline::shaders::depth::DepthShader;
use crate::pipeline::shaders::phong::PhongShader;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Vertex stage: rebuilds `mesh.vertices_out` from the mesh's vertices.
///
/// Positions go to NDC (x, y, z divided by w, w kept). Normals and tangents are
/// rotated into world space only. The view direction points from the vertex to
/// the camera and is left unnormalized.
pub fn transform_vertices(mesh: &mut Mesh, camera: &Camera) {
    let world = mesh.world_matrix;
    let wvp = camera.world_view_projection(&world);
    let world_rotation = world.fixed_view::<3, 3>(0, 0).into_owned();
    let eye = camera.origin;

    mesh.vertices
        .par_iter()
        .map(|vertex| {
            let clip = wvp * vertex.position.to_homogeneous();
            let world_pos = world.transform_point(&vertex.position);

            VertexOut {
                position: apply_perspective_division(&clip),
                color: Vector3::new(1.0, 1.0, 1.0),
                texcoord: vertex.texcoord,
                normal: (world_rotation * vertex.normal)
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::zeros),
                tangent: (world_rotation * vertex.tangent)
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::zeros),
                view_direction: eye - world_pos,
            }
        })
        .collect_into_vec(&mut mesh.vertices_out);
}

/// Executes the main software pass: clear, then transform and rasterize every
/// visible object in submission order.
pub fn render_main_pass(
    context: &mut RenderContext,
    settings: &RenderSettings,
    rasterizer: &mut Rasterizer,
    framebuffer: &mut FrameBuffer,
) -> RasterStats {
    framebuffer.clear(settings.clear_color(), f32::INFINITY);
    rasterizer.show_bounding_boxes = settings.show_bounding_boxes;

    let camera = &context.camera;
    let mut stats = RasterStats::default();

    for obj in context.scene_objects.iter_mut() {
        if obj.auxiliary && !settings.show_auxiliary {
            continue;
        }

        transform_vertices(&mut obj.mesh, camera);

        stats += if settings.show_depth_buffer {
            rasterizer.draw_mesh(framebuffer, &obj.mesh, &DepthShader::default())
        } else {
            let shader = PhongShader {
                material: &obj.material,
                light: context.light,
                lighting: context.lighting,
                mode: settings.lighting_mode,
                normal_mapping: settings.normal_mapping,
                filter: settings.sample_filter,
            };
            rasterizer.draw_mesh(framebuffer, &obj.mesh, &shader)
        };
    }

    stats
}
