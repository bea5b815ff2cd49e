//! 3-D line clipping against the canonical perspective volume.
//!
//! In canonical space the side planes pass through the z-axis, so every
//! boundary is a linear function of the point's own z:
//!
//! ```text
//! z <= x <= -z
//! z <= y <= -z
//! -1 <= z <= z_min
//! ```
//!
//! Clipping is Cohen–Sutherland style: outcodes decide trivial accept and
//! reject, otherwise the offending endpoint is slid along the segment onto
//! each violated plane in turn.

use bitflags::bitflags;
use tracing::trace;

use crate::transform::Vec4;

/// Tolerance applied to every half-space test.
pub const CLIP_EPSILON: f64 = 1e-6;

/// Upper bound on full six-plane passes for one segment.
pub const MAX_CLIP_PASSES: usize = 6;

bitflags! {
    /// Half-spaces of the canonical volume a point lies outside of.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Outcode: u8 {
        const LEFT = 1 << 5;
        const RIGHT = 1 << 4;
        const BOTTOM = 1 << 3;
        const TOP = 1 << 2;
        const FAR = 1 << 1;
        const NEAR = 1 << 0;
    }
}

/// A clip plane of the canonical volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl ClipPlane {
    /// Planes in the order they are tried while clipping.
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    pub fn outcode(self) -> Outcode {
        match self {
            Self::Left => Outcode::LEFT,
            Self::Right => Outcode::RIGHT,
            Self::Bottom => Outcode::BOTTOM,
            Self::Top => Outcode::TOP,
            Self::Near => Outcode::NEAR,
            Self::Far => Outcode::FAR,
        }
    }

    /// Plane function; zero on the plane, changes sign across it.
    fn eval(self, p: &Vec4, z_min: f64) -> f64 {
        match self {
            Self::Left => p.x - p.z,
            Self::Right => p.x + p.z,
            Self::Bottom => p.y - p.z,
            Self::Top => p.y + p.z,
            Self::Near => p.z - z_min,
            Self::Far => p.z + 1.0,
        }
    }
}

/// A line segment in homogeneous coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec4,
    pub end: Vec4,
}

impl Segment {
    pub fn new(start: Vec4, end: Vec4) -> Self {
        Self { start, end }
    }

    /// Point at parameter `t` along the segment; all four components are
    /// interpolated.
    pub fn lerp(&self, t: f64) -> Vec4 {
        self.start + (self.end - self.start) * t
    }
}

/// Classify `p` against the six half-spaces.
pub fn outcode(p: &Vec4, z_min: f64) -> Outcode {
    let mut code = Outcode::empty();

    if p.x < p.z - CLIP_EPSILON {
        code |= Outcode::LEFT;
    } else if p.x > -p.z + CLIP_EPSILON {
        code |= Outcode::RIGHT;
    }

    if p.y < p.z - CLIP_EPSILON {
        code |= Outcode::BOTTOM;
    } else if p.y > -p.z + CLIP_EPSILON {
        code |= Outcode::TOP;
    }

    if p.z < -1.0 - CLIP_EPSILON {
        code |= Outcode::FAR;
    } else if p.z > z_min + CLIP_EPSILON {
        code |= Outcode::NEAR;
    }

    code
}

/// Clip a segment to the canonical volume.
///
/// Returns `None` when nothing of the segment is visible. A segment already
/// inside is returned unchanged, so clipping is idempotent.
pub fn clip_segment(p0: Vec4, p1: Vec4, z_min: f64) -> Option<Segment> {
    let mut segment = Segment::new(p0, p1);
    let mut out0 = outcode(&segment.start, z_min);
    let mut out1 = outcode(&segment.end, z_min);

    for _ in 0..MAX_CLIP_PASSES {
        if (out0 | out1).is_empty() {
            return Some(segment);
        }
        if out0.intersects(out1) {
            return None;
        }

        for plane in ClipPlane::ALL {
            let bit = plane.outcode();
            let start_out = out0.contains(bit);
            if start_out == out1.contains(bit) {
                continue;
            }

            let f0 = plane.eval(&segment.start, z_min);
            let f1 = plane.eval(&segment.end, z_min);
            let denom = f0 - f1;
            if denom == 0.0 {
                continue;
            }
            let crossing = segment.lerp((f0 / denom).clamp(0.0, 1.0));

            if start_out {
                segment.start = crossing;
            } else {
                segment.end = crossing;
            }
            out0 = outcode(&segment.start, z_min);
            out1 = outcode(&segment.end, z_min);
        }
    }

    if (out0 | out1).is_empty() {
        return Some(segment);
    }

    trace!(?segment, ?out0, ?out1, "clip passes exhausted; dropping segment");
    None
}
