use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the transformation matrices used by the pipeline.
///
/// Matrices are column-major and applied as `M * v`, so the classic row-vector
/// chain `world * view * projection` is written `projection * view * world` here.
/// The camera convention is left-handed: +Z points into the screen and
/// projected depth lands in [0, 1].
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a left-handed view matrix for an eye looking along `forward`.
    pub fn view(eye: &Point3<f32>, forward: &Vector3<f32>, world_up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = forward.normalize();
        let x_axis = world_up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let eye = eye.coords;
        Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(&eye),
            y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(&eye),
            z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(&eye),
            0.0,      0.0,      0.0,      1.0,
        )
    }

    /// Creates a left-handed perspective projection.
    /// View-space depth `near..far` maps to NDC depth `0..1`; clip w is the view-space depth.
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let range = far / (far - near);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,   0.0,
            0.0,              f,   0.0,   0.0,
            0.0,              0.0, range, -near * range,
            0.0,              0.0, 1.0,   0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Perspective divide: x, y and z are divided by w, w itself is kept for
/// perspective-correct interpolation later on.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Vector4<f32> {
    let w = clip.w;
    Vector4::new(clip.x / w, clip.y / w, clip.z / w, w)
}

/// Converts NDC coordinates to raster coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, raster +Y is down).
#[inline]
pub fn ndc_to_raster(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new((ndc_x + 1.0) * 0.5 * width, (1.0 - ndc_y) * 0.5 * height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let proj = TransformFactory::perspective(1.0, 90f32.to_radians(), 0.1, 100.0);

        let near = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, 0.1, 1.0)));
        let far = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, 100.0, 1.0)));

        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(far.w, 100.0, epsilon = 1e-4);
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let eye = Point3::new(1.0, 2.0, 3.0);
        let view = TransformFactory::view(&eye, &Vector3::z(), &Vector3::y());
        let p = view * eye.to_homogeneous();
        assert_relative_eq!(p, Vector4::new(0.0, 0.0, 0.0, 1.0), epsilon = 1e-6);

        let ahead = view * Point3::new(1.0, 2.0, 13.0).to_homogeneous();
        assert_relative_eq!(ahead.z, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn raster_mapping_flips_y() {
        let top_left = ndc_to_raster(-1.0, 1.0, 640.0, 480.0);
        let bottom_right = ndc_to_raster(1.0, -1.0, 640.0, 480.0);
        assert_relative_eq!(top_left, Point2::new(0.0, 0.0));
        assert_relative_eq!(bottom_right, Point2::new(640.0, 480.0));
    }
}
