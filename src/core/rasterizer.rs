use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::{Topology, VertexOut};
use crate::core::math::interpolation::{
    EPSILON, edge_functions, interpolate_depth, is_inside_triangle, perspective_correct,
    signed_area,
};
use crate::core::math::transform::ndc_to_raster;
use crate::core::pipeline::PixelShader;
use crate::scene::mesh::Mesh;
use nalgebra::{Point2, Vector3, Vector4};
use std::ops::AddAssign;

/// The Rasterizer turns transformed triangles into shaded pixels on the FrameBuffer.
pub struct Rasterizer {
    /// Fill each surviving triangle's bounding box in white instead of shading it.
    pub show_bounding_boxes: bool,
}

/// What happened to a single triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleOutcome {
    /// Repeated indices or (near) zero raster-space area.
    Degenerate,
    /// Entirely outside the horizontal or vertical NDC range, or a vertex outside [0, 1] depth.
    Culled,
    /// Scanned; `fragments` pixels passed coverage and depth and were written.
    Rasterized { fragments: usize },
}

/// Per-frame triangle and fragment counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RasterStats {
    pub submitted: usize,
    pub degenerate: usize,
    pub culled: usize,
    pub rasterized: usize,
    pub fragments: usize,
}

impl RasterStats {
    fn record(&mut self, outcome: TriangleOutcome) {
        self.submitted += 1;
        match outcome {
            TriangleOutcome::Degenerate => self.degenerate += 1,
            TriangleOutcome::Culled => self.culled += 1,
            TriangleOutcome::Rasterized { fragments } => {
                self.rasterized += 1;
                self.fragments += fragments;
            }
        }
    }
}

impl AddAssign for RasterStats {
    fn add_assign(&mut self, other: Self) {
        self.submitted += other.submitted;
        self.degenerate += other.degenerate;
        self.culled += other.culled;
        self.rasterized += other.rasterized;
        self.fragments += other.fragments;
    }
}

/// Steps through `indices` and yields one index triplet per triangle.
///
/// Lists advance by three. Strips advance by one and swap the second and third
/// index of every triangle that starts at an odd position, so all strip triangles
/// share the winding of the first one. Degenerate triplets are yielded as-is.
pub fn assemble_triangles(indices: &[u32], topology: Topology) -> impl Iterator<Item = [u32; 3]> + '_ {
    let stride = match topology {
        Topology::TriangleList => 3,
        Topology::TriangleStrip => 1,
    };

    (0..indices.len().saturating_sub(2))
        .step_by(stride)
        .map(move |i| {
            let (a, mut b, mut c) = (indices[i], indices[i + 1], indices[i + 2]);
            if topology == Topology::TriangleStrip && i % 2 != 0 {
                std::mem::swap(&mut b, &mut c);
            }
            [a, b, c]
        })
}

#[inline]
fn is_degenerate([a, b, c]: [u32; 3]) -> bool {
    a == b || b == c || c == a
}

/// Coarse reject: all three x outside [-1, 1], all three y outside [-1, 1], or any
/// depth outside [0, 1]. Partially visible triangles are kept, never clipped.
#[inline]
fn is_culled(v: &[VertexOut; 3]) -> bool {
    let outside = |value: f32| !(-1.0..=1.0).contains(&value);

    if v.iter().all(|v| outside(v.position.x)) {
        return true;
    }
    if v.iter().all(|v| outside(v.position.y)) {
        return true;
    }
    v.iter().any(|v| !(0.0..=1.0).contains(&v.position.z))
}

#[inline]
fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            show_bounding_boxes: false,
        }
    }

    /// Rasterizes every triangle of `mesh` using its current `vertices_out`.
    ///
    /// Triangles are processed strictly in index order, each one to completion.
    pub fn draw_mesh<S: PixelShader>(
        &self,
        framebuffer: &mut FrameBuffer,
        mesh: &Mesh,
        shader: &S,
    ) -> RasterStats {
        let mut stats = RasterStats::default();

        for triangle in assemble_triangles(&mesh.indices, mesh.topology) {
            if is_degenerate(triangle) {
                stats.record(TriangleOutcome::Degenerate);
                continue;
            }

            let fetch = |i: u32| mesh.vertices_out.get(i as usize).copied();
            let (Some(v0), Some(v1), Some(v2)) =
                (fetch(triangle[0]), fetch(triangle[1]), fetch(triangle[2]))
            else {
                stats.record(TriangleOutcome::Degenerate);
                continue;
            };

            let outcome = self.rasterize_triangle(framebuffer, shader, &[v0, v1, v2]);
            stats.record(outcome);
        }

        stats
    }

    /// Rasterize a single triangle whose vertices hold NDC x/y/z and clip-space w.
    pub fn rasterize_triangle<S: PixelShader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        vertices: &[VertexOut; 3],
    ) -> TriangleOutcome {
        if is_culled(vertices) {
            return TriangleOutcome::Culled;
        }

        let width = framebuffer.width as f32;
        let height = framebuffer.height as f32;

        // 1. NDC -> Raster Space
        let raster = vertices.map(|v| ndc_to_raster(v.position.x, v.position.y, width, height));
        let [a, b, c] = raster;

        let area = signed_area(a, b, c);
        if area.is_nan() || area.abs() < EPSILON {
            return TriangleOutcome::Degenerate;
        }

        // 2. Bounding Box, clamped to the buffer
        let (min_x, min_y, max_x, max_y) =
            self.compute_bounding_box(&raster, framebuffer.width, framebuffer.height);

        if self.show_bounding_boxes {
            let white = Vector3::new(1.0, 1.0, 1.0);
            for y in min_y..max_y {
                for x in min_x..max_x {
                    framebuffer.set_pixel(x, y, white);
                }
            }
            return TriangleOutcome::Rasterized {
                fragments: (max_x - min_x) * (max_y - min_y),
            };
        }

        let z_values = vertices.map(|v| v.position.z);
        let w_values = vertices.map(|v| v.position.w);
        let inv_area = 1.0 / area;
        let mut fragments = 0;

        // 3. Pixel Loop
        for y in min_y..max_y {
            for x in min_x..max_x {
                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);

                let edges = edge_functions(pixel_center, a, b, c);
                if !is_inside_triangle(edges) {
                    continue;
                }
                let weights = edges * inv_area;

                // Depth test on the non-linear depth
                let depth = interpolate_depth(weights, z_values);
                if !framebuffer.depth_test_and_update(x, y, depth) {
                    continue;
                }

                // Perspective-correct attributes, weighted by the linear depth
                let w = interpolate_depth(weights, w_values);
                let fragment = VertexOut {
                    position: Vector4::new(x as f32, y as f32, depth, w),
                    color: perspective_correct(weights, vertices.map(|v| v.color), w_values, w),
                    texcoord: perspective_correct(weights, vertices.map(|v| v.texcoord), w_values, w),
                    normal: normalize_or_zero(perspective_correct(
                        weights,
                        vertices.map(|v| v.normal),
                        w_values,
                        w,
                    )),
                    tangent: normalize_or_zero(perspective_correct(
                        weights,
                        vertices.map(|v| v.tangent),
                        w_values,
                        w,
                    )),
                    view_direction: normalize_or_zero(perspective_correct(
                        weights,
                        vertices.map(|v| v.view_direction),
                        w_values,
                        w,
                    )),
                };

                let color = shader.shade(&fragment);
                framebuffer.set_pixel(x, y, color);
                fragments += 1;
            }
        }

        TriangleOutcome::Rasterized { fragments }
    }

    /// Integer pixel bounds `[min, max)` of the triangle, clamped to `[0, width] x [0, height]`.
    fn compute_bounding_box(
        &self,
        points: &[Point2<f32>; 3],
        width: usize,
        height: usize,
    ) -> (usize, usize, usize, usize) {
        let clamp_x = |v: f32| v.clamp(0.0, width as f32) as usize;
        let clamp_y = |v: f32| v.clamp(0.0, height as f32) as usize;

        let min_x = clamp_x(points[0].x.min(points[1].x).min(points[2].x).floor());
        let min_y = clamp_y(points[0].y.min(points[1].y).min(points[2].y).floor());
        let max_x = clamp_x(points[0].x.max(points[1].x).max(points[2].x).ceil());
        let max_y = clamp_y(points[0].y.max(points[1].y).max(points[2].y).ceil());
        (min_x, min_y, max_x, max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;
    use std::cell::RefCell;

    struct FlatShader(Vector3<f32>);

    impl PixelShader for FlatShader {
        fn shade(&self, _fragment: &VertexOut) -> Vector3<f32> {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingShader(RefCell<Vec<VertexOut>>);

    impl PixelShader for RecordingShader {
        fn shade(&self, fragment: &VertexOut) -> Vector3<f32> {
            self.0.borrow_mut().push(*fragment);
            Vector3::zeros()
        }
    }

    fn vertex(x: f32, y: f32, z: f32, w: f32) -> VertexOut {
        VertexOut {
            position: Vector4::new(x, y, z, w),
            normal: Vector3::new(0.0, 0.0, -1.0),
            ..Default::default()
        }
    }

    /// Clockwise in NDC (y up), which is the accepted winding.
    fn centered_triangle(z: f32) -> [VertexOut; 3] {
        [
            vertex(-0.5, 0.5, z, 10.0),
            vertex(0.5, 0.5, z, 10.0),
            vertex(-0.5, -0.5, z, 10.0),
        ]
    }

    #[test]
    fn list_assembly_uses_stride_three() {
        let tris: Vec<_> = assemble_triangles(&[0, 1, 2, 3, 4, 5, 6], Topology::TriangleList).collect();
        assert_eq!(tris, vec![[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn strip_assembly_swaps_odd_triangles() {
        let tris: Vec<_> = assemble_triangles(&[0, 1, 2, 3, 4], Topology::TriangleStrip).collect();
        assert_eq!(tris, vec![[0, 1, 2], [1, 3, 2], [2, 3, 4]]);
    }

    #[test]
    fn short_index_buffers_produce_nothing() {
        assert_eq!(assemble_triangles(&[0, 1], Topology::TriangleStrip).count(), 0);
        assert_eq!(assemble_triangles(&[], Topology::TriangleList).count(), 0);
    }

    #[test]
    fn covered_pixels_get_shader_color_and_depth() {
        let mut fb = FrameBuffer::new(40, 40);
        let rasterizer = Rasterizer::new();
        let shader = FlatShader(Vector3::new(1.0, 0.0, 0.0));

        let outcome = rasterizer.rasterize_triangle(&mut fb, &shader, &centered_triangle(0.5));

        let TriangleOutcome::Rasterized { fragments } = outcome else {
            panic!("expected the triangle to be rasterized, got {outcome:?}");
        };
        assert!(fragments > 0);
        // Raster (10, 10)..(30, 10)..(10, 30); pixel (12, 12) is well inside.
        assert_eq!(fb.get_pixel(12, 12), Some(0xFFFF0000));
        assert!((fb.get_depth(12, 12).unwrap() - 0.5).abs() < 1e-5);
        assert_eq!(fb.get_depth(28, 28), Some(f32::INFINITY));
    }

    #[test]
    fn depth_out_of_range_is_culled() {
        let mut fb = FrameBuffer::new(16, 16);
        let mut tri = centered_triangle(0.5);
        tri[1].position.z = 1.2;

        let outcome = Rasterizer::new().rasterize_triangle(&mut fb, &FlatShader(Vector3::zeros()), &tri);
        assert_eq!(outcome, TriangleOutcome::Culled);
    }

    #[test]
    fn partially_visible_triangle_is_kept() {
        let mut fb = FrameBuffer::new(16, 16);
        let tri = [
            vertex(0.5, 0.5, 0.5, 1.0),
            vertex(3.0, 0.5, 0.5, 1.0),
            vertex(0.5, -0.5, 0.5, 1.0),
        ];
        let outcome = Rasterizer::new().rasterize_triangle(&mut fb, &FlatShader(Vector3::zeros()), &tri);
        assert!(matches!(outcome, TriangleOutcome::Rasterized { fragments } if fragments > 0));
    }

    #[test]
    fn reversed_winding_writes_nothing() {
        let mut fb = FrameBuffer::new(40, 40);
        let [a, b, c] = centered_triangle(0.5);

        let outcome = Rasterizer::new().rasterize_triangle(&mut fb, &FlatShader(Vector3::zeros()), &[a, c, b]);

        assert_eq!(outcome, TriangleOutcome::Rasterized { fragments: 0 });
        assert!(fb.depth_buffer.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn bounding_box_mode_fills_the_whole_box() {
        let mut fb = FrameBuffer::new(40, 40);
        let rasterizer = Rasterizer {
            show_bounding_boxes: true,
        };

        let outcome = rasterizer.rasterize_triangle(&mut fb, &FlatShader(Vector3::zeros()), &centered_triangle(0.5));

        assert_eq!(outcome, TriangleOutcome::Rasterized { fragments: 400 });
        // Outside the triangle but inside its box.
        assert_eq!(fb.get_pixel(28, 28), Some(0xFFFFFFFF));
        assert_eq!(fb.get_pixel(5, 5), Some(0));
    }

    #[test]
    fn mesh_with_out_of_range_index_counts_as_degenerate() {
        let mut mesh = Mesh::new(Vec::new(), vec![0, 1, 7], Topology::TriangleList);
        mesh.vertices_out = centered_triangle(0.5).to_vec();
        let mut fb = FrameBuffer::new(8, 8);

        let stats = Rasterizer::new().draw_mesh(&mut fb, &mesh, &FlatShader(Vector3::zeros()));
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.fragments, 0);
    }

    #[test]
    fn attributes_are_perspective_correct_and_directions_unit_length() {
        let uvs = [Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)];
        let w_values = [1.0, 9.0, 5.0];
        let mut triangle = centered_triangle(0.5);
        for (i, v) in triangle.iter_mut().enumerate() {
            v.position.w = w_values[i];
            v.texcoord = uvs[i];
        }
        // Deliberately not unit length.
        triangle[0].normal = Vector3::new(0.0, 0.0, -2.0);
        triangle[1].normal = Vector3::new(1.0, 0.0, -1.0);
        triangle[2].normal = Vector3::new(0.0, 1.0, -1.0);
        triangle[0].view_direction = Vector3::new(0.0, 0.0, -10.0);
        triangle[1].view_direction = Vector3::new(2.0, 0.0, -10.0);
        triangle[2].view_direction = Vector3::new(0.0, 3.0, -10.0);
        for v in &mut triangle {
            v.tangent = Vector3::new(3.0, 0.0, 0.0);
        }

        let mut fb = FrameBuffer::new(40, 40);
        let shader = RecordingShader::default();
        Rasterizer::new().rasterize_triangle(&mut fb, &shader, &triangle);
        let fragments = shader.0.into_inner();
        assert!(!fragments.is_empty());

        for f in &fragments {
            assert_relative_eq!(f.normal.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(f.tangent.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(f.view_direction.norm(), 1.0, epsilon = 1e-5);
        }

        // Screen-space weights at the centre of pixel (20, 12).
        let [a, b, c] = triangle.map(|v| ndc_to_raster(v.position.x, v.position.y, 40.0, 40.0));
        let weights = edge_functions(Point2::new(20.5, 12.5), a, b, c) / signed_area(a, b, c);
        assert_relative_eq!(weights, Vector3::new(0.35, 0.525, 0.125), epsilon = 1e-5);

        let fragment = fragments
            .iter()
            .find(|f| f.position.x == 20.0 && f.position.y == 12.0)
            .expect("pixel (20, 12) is covered");

        let inv_w = weights.x / w_values[0] + weights.y / w_values[1] + weights.z / w_values[2];
        let w = 1.0 / inv_w;
        assert_relative_eq!(fragment.position.w, w, epsilon = 1e-4);

        let expected_uv = Vector2::new(weights.y / w_values[1], weights.z / w_values[2]) * w;
        assert_relative_eq!(fragment.texcoord, expected_uv, epsilon = 1e-4);
        // Affine interpolation would give (weights.y, weights.z).
        assert!((fragment.texcoord.x - weights.y).abs() > 1e-2);
        assert!((fragment.texcoord.y - weights.z).abs() > 1e-2);
    }
}
