//! Vector and matrix algebra for homogeneous transforms.
//!
//! Fixed-size math goes through nalgebra's static types; `multiply` covers the
//! general case where operand shapes are only known at runtime.

use nalgebra::{DMatrix, Matrix4, Vector3, Vector4};

use crate::error::GeometryError;

pub type Vec3 = Vector3<f64>;
pub type Vec4 = Vector4<f64>;
pub type Mat4 = Matrix4<f64>;

/// Below this length a vector has no usable direction.
pub const NORMALIZE_EPSILON: f64 = 1e-9;

/// Unit vector in the direction of `v`.
pub fn normalize(v: &Vec3) -> Result<Vec3, GeometryError> {
    v.try_normalize(NORMALIZE_EPSILON)
        .ok_or(GeometryError::DegenerateVector { norm: v.norm() })
}

/// Homogeneous point with w = 1.
pub fn point(x: f64, y: f64, z: f64) -> Vec4 {
    Vec4::new(x, y, z, 1.0)
}

/// Product `M1 · M2 · … · Mk` of arbitrarily shaped matrices.
///
/// Column vectors are `n×1` matrices, so `multiply(&[m, v])` applies `m` to `v`.
pub fn multiply(chain: &[DMatrix<f64>]) -> Result<DMatrix<f64>, GeometryError> {
    let (first, rest) = chain.split_first().ok_or(GeometryError::EmptyChain)?;
    let mut product = first.clone();
    for next in rest {
        if product.ncols() != next.nrows() {
            return Err(GeometryError::DimensionMismatch {
                left_rows: product.nrows(),
                left_cols: product.ncols(),
                right_rows: next.nrows(),
                right_cols: next.ncols(),
            });
        }
        product = &product * next;
    }
    Ok(product)
}

/// Product of 4x4 transforms, left to right. The last entry is applied first.
pub fn compose(chain: &[Mat4]) -> Mat4 {
    chain.iter().fold(Mat4::identity(), |acc, m| acc * m)
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Mat4 {
        Mat4::identity()
    }

    /// Create a translation matrix
    #[rustfmt::skip]
    pub fn translation_matrix(tx: f64, ty: f64, tz: f64) -> Mat4 {
        Mat4::new(
            1.0, 0.0, 0.0, tx,
            0.0, 1.0, 0.0, ty,
            0.0, 0.0, 1.0, tz,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a scale matrix
    #[rustfmt::skip]
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Mat4 {
        Mat4::new(
            sx, 0.0, 0.0, 0.0,
            0.0, sy, 0.0, 0.0,
            0.0, 0.0, sz, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Shear parallel to the xy-plane: x += shx·z, y += shy·z
    #[rustfmt::skip]
    pub fn shear_xy_matrix(shx: f64, shy: f64) -> Mat4 {
        Mat4::new(
            1.0, 0.0, shx, 0.0,
            0.0, 1.0, shy, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_x_matrix(theta: f64) -> Mat4 {
        let (sin, cos) = theta.sin_cos();
        Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, cos, -sin, 0.0,
            0.0, sin, cos, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_y_matrix(theta: f64) -> Mat4 {
        let (sin, cos) = theta.sin_cos();
        Mat4::new(
            cos, 0.0, sin, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -sin, 0.0, cos, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_z_matrix(theta: f64) -> Mat4 {
        let (sin, cos) = theta.sin_cos();
        Mat4::new(
            cos, -sin, 0.0, 0.0,
            sin, cos, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_normalize() {
        let n = normalize(&Vec3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((n - Vec3::new(0.6, 0.0, 0.8)).norm() < 1e-12);
    }

    #[test]
    fn test_normalize_rejects_tiny_vector() {
        let err = normalize(&Vec3::new(1e-12, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateVector { .. }));
    }

    #[test]
    fn test_cross_leaves_inputs_untouched() {
        let a = Vec3::x();
        let b = Vec3::y();
        assert_eq!(a.cross(&b), Vec3::z());
        assert_eq!(a, Vec3::x());
        assert_eq!(b, Vec3::y());
    }

    #[test]
    fn test_multiply_chain() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let v = DMatrix::from_column_slice(3, 1, &[1.0, 0.0, -1.0]);
        let s = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 2.0]);

        let product = multiply(&[s, m, v]).unwrap();
        assert_eq!(product.shape(), (2, 1));
        assert_eq!(product[(0, 0)], -4.0);
        assert_eq!(product[(1, 0)], -4.0);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = DMatrix::<f64>::identity(4, 4);
        let b = DMatrix::<f64>::zeros(3, 1);
        assert_eq!(
            multiply(&[a, b]),
            Err(GeometryError::DimensionMismatch {
                left_rows: 4,
                left_cols: 4,
                right_rows: 3,
                right_cols: 1,
            })
        );
        assert_eq!(multiply(&[]), Err(GeometryError::EmptyChain));
    }

    #[test]
    fn test_compose_applies_rightmost_first() {
        let translate = Transform::translation_matrix(1.0, 0.0, 0.0);
        let scale = Transform::scale_matrix(2.0, 2.0, 2.0);

        let p = compose(&[scale, translate]) * point(1.0, 1.0, 1.0);
        assert_eq!(p, Vec4::new(4.0, 2.0, 2.0, 1.0));
    }

    #[test]
    fn test_rotations() {
        let x = Transform::rotation_y_matrix(FRAC_PI_2) * point(1.0, 0.0, 0.0);
        assert!((x - point(0.0, 0.0, -1.0)).norm() < 1e-12);

        let y = Transform::rotation_z_matrix(FRAC_PI_2) * point(1.0, 0.0, 0.0);
        assert!((y - point(0.0, 1.0, 0.0)).norm() < 1e-12);

        let z = Transform::rotation_x_matrix(FRAC_PI_2) * point(0.0, 1.0, 0.0);
        assert!((z - point(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_identity() {
        assert!((Transform::identity() - Mat4::identity()).norm() < 1e-12);
    }
}
