//! Camera parameters and the world → canonical view volume transform.

use crate::error::{GeometryError, SceneError};
use crate::transform::{compose, normalize, Mat4, Transform, Vec3};

/// View window bounds. `left..right` and `bottom..top` are measured in the
/// plane perpendicular to the view axis; `near` and `far` are distances along
/// the negated view axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl ClipWindow {
    /// Build from `[left, right, bottom, top, near, far]`.
    pub fn from_array(clip: [f64; 6]) -> Self {
        let [left, right, bottom, top, near, far] = clip;
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.left, self.right, self.bottom, self.top, self.near, self.far]
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let invalid = |message: &str| {
            Err(SceneError::InvalidView {
                message: message.to_string(),
            })
        };

        if self.to_array().iter().any(|c| !c.is_finite()) {
            return invalid("clip values must be finite");
        }
        if self.left >= self.right {
            return invalid("clip requires left < right");
        }
        if self.bottom >= self.top {
            return invalid("clip requires bottom < top");
        }
        if self.near <= 0.0 {
            return invalid("clip requires near > 0");
        }
        if self.far <= self.near {
            return invalid("clip requires far > near");
        }
        Ok(())
    }
}

/// Camera configuration for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Projection reference point (eye)
    pub prp: Vec3,
    /// Scene reference point (look-at target)
    pub srp: Vec3,
    /// View-up direction
    pub vup: Vec3,
    pub clip: ClipWindow,
}

impl View {
    pub fn new(prp: Vec3, srp: Vec3, vup: Vec3, clip: ClipWindow) -> Self {
        Self {
            prp,
            srp,
            vup,
            clip,
        }
    }

    /// Check every invariant a frame relies on.
    pub fn validate(&self) -> crate::Result<()> {
        self.clip.validate()?;
        self.normalizing_matrix()?;
        Ok(())
    }

    /// Orthonormal view-reference basis `(u, v, n)`, with `n` pointing from
    /// the scene back toward the eye.
    pub fn basis(&self) -> Result<(Vec3, Vec3, Vec3), GeometryError> {
        let finite = |v: &Vec3| v.iter().all(|c| c.is_finite());
        if !(finite(&self.prp) && finite(&self.srp) && finite(&self.vup)) {
            return Err(GeometryError::DegenerateView {
                reason: "camera vectors must be finite",
            });
        }

        let n = normalize(&(self.prp - self.srp)).map_err(|_| GeometryError::DegenerateView {
            reason: "PRP and SRP coincide",
        })?;
        let u = normalize(&self.vup.cross(&n)).map_err(|_| GeometryError::DegenerateView {
            reason: "VUP is parallel to the view axis",
        })?;
        let v = n.cross(&u);
        Ok((u, v, n))
    }

    /// The normalizing transform `N = SC · SH · R · T`: maps world
    /// coordinates into the canonical perspective volume bounded by
    /// x, y in [z, -z] and z in [-1, z_min].
    pub fn normalizing_matrix(&self) -> Result<Mat4, GeometryError> {
        let (u, v, n) = self.basis()?;
        let clip = &self.clip;

        let translate = Transform::translation_matrix(-self.prp.x, -self.prp.y, -self.prp.z);

        #[rustfmt::skip]
        let rotate = Mat4::new(
            u.x, u.y, u.z, 0.0,
            v.x, v.y, v.z, 0.0,
            n.x, n.y, n.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        // Center of the window on the near plane
        let dop = Vec3::new(
            (clip.left + clip.right) / 2.0,
            (clip.bottom + clip.top) / 2.0,
            -clip.near,
        );
        let shear = Transform::shear_xy_matrix(-dop.x / dop.z, -dop.y / dop.z);

        let scale = Transform::scale_matrix(
            2.0 * clip.near / ((clip.right - clip.left) * clip.far),
            2.0 * clip.near / ((clip.top - clip.bottom) * clip.far),
            1.0 / clip.far,
        );

        let matrix = compose(&[scale, shear, rotate, translate]);
        if matrix.iter().all(|c| c.is_finite()) {
            Ok(matrix)
        } else {
            Err(GeometryError::DegenerateView {
                reason: "clip window produces a non-finite transform",
            })
        }
    }

    /// Position of the near plane in the canonical volume.
    pub fn z_min(&self) -> f64 {
        -self.clip.near / self.clip.far
    }
}
