//! Perspective-to-parallel, viewport and the homogeneous divide.
use crate::error::GeometryError;
use crate::transform::{compose, Mat4, Vec4};
use crate::view::View;

/// Points whose w is smaller than this are at (or behind) the eye plane.
pub const PROJECTION_EPSILON: f64 = 1e-9;

/// Perspective-to-parallel matrix: copies x, y, z and sets w = -z.
#[rustfmt::skip]
pub fn m_per() -> Mat4 {
    Mat4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, -1.0, 0.0,
    )
}

/// Maps [-1, 1] x [-1, 1] to [0, width] x [0, height].
#[rustfmt::skip]
pub fn viewport(width: u32, height: u32) -> Mat4 {
    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;
    Mat4::new(
        half_w, 0.0, 0.0, half_w,
        0.0, half_h, 0.0, half_h,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// `MPer · N` for the given view: the matrix applied to every vertex before
/// clipping.
///
/// `MPer` only rewrites w, so the clip tests on x, y and z see the
/// canonical-volume coordinates unchanged.
pub fn composite_matrix(view: &View) -> Result<Mat4, GeometryError> {
    let normalizing = view.normalizing_matrix()?;
    Ok(compose(&[m_per(), normalizing]))
}

/// Project a homogeneous point to pixel coordinates
pub fn project_to_pixels(point: &Vec4, width: u32, height: u32) -> Option<(f64, f64)> {
    project_with(&viewport(width, height), point)
}

/// Same as [`project_to_pixels`] with a precomputed viewport matrix.
pub fn project_with(viewport: &Mat4, point: &Vec4) -> Option<(f64, f64)> {
    let v = viewport * point;

    // Prevent division by near-zero w
    if v.w.abs() < PROJECTION_EPSILON || !v.w.is_finite() {
        return None;
    }

    Some((v.x / v.w, v.y / v.w))
}
