//! Wireframe models: homogeneous vertices plus polyline edges.
use std::f64::consts::TAU;

use crate::error::SceneError;
use crate::transform::{point, Mat4, Vec3, Vec4};

/// Which catalog entry a model came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Generic,
    Cube,
    Cylinder,
}

/// An ordered run of vertex indices; consecutive pairs are drawn as segments.
pub type Edge = Vec<usize>;

/// A wireframe model
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub kind: ModelKind,
    pub vertices: Vec<Vec4>,
    pub edges: Vec<Edge>,
    /// Model-local transform, applied before the view transform
    pub matrix: Mat4,
}

impl Model {
    /// Build a generic model. `index` only labels errors.
    pub fn generic(
        index: usize,
        vertices: Vec<Vec4>,
        edges: Vec<Edge>,
    ) -> Result<Self, SceneError> {
        let vertex_count = vertices.len();
        for (edge_index, edge) in edges.iter().enumerate() {
            if let Some(&bad) = edge.iter().find(|&&i| i >= vertex_count) {
                return Err(SceneError::EdgeIndexOutOfRange {
                    model: index,
                    edge: edge_index,
                    index: bad,
                    vertex_count,
                });
            }
        }

        Ok(Self {
            kind: ModelKind::Generic,
            vertices,
            edges,
            matrix: Mat4::identity(),
        })
    }

    /// Axis-aligned box: a ring at z = center.z + depth/2, a ring at
    /// z = center.z - depth/2, and four connectors.
    pub fn cube(center: Vec3, width: f64, height: f64, depth: f64) -> Self {
        let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
        let mut vertices = Vec::with_capacity(8);

        for z in [center.z + hd, center.z - hd] {
            vertices.push(point(center.x - hw, center.y + hh, z));
            vertices.push(point(center.x + hw, center.y + hh, z));
            vertices.push(point(center.x + hw, center.y - hh, z));
            vertices.push(point(center.x - hw, center.y - hh, z));
        }

        let edges = vec![
            vec![0, 1, 2, 3, 0],
            vec![4, 5, 6, 7, 4],
            vec![0, 4],
            vec![1, 5],
            vec![2, 6],
            vec![3, 7],
        ];

        Self {
            kind: ModelKind::Cube,
            vertices,
            edges,
            matrix: Mat4::identity(),
        }
    }

    /// Cylinder around a y-parallel axis approximated by `sides`-gon rings.
    pub fn cylinder(center: Vec3, radius: f64, height: f64, sides: usize) -> Self {
        let half = height / 2.0;
        let step = TAU / sides as f64;
        let mut vertices = Vec::with_capacity(2 * sides);

        for y in [center.y + half, center.y - half] {
            for k in 0..sides {
                let (sin, cos) = (step * k as f64).sin_cos();
                vertices.push(point(center.x + radius * cos, y, center.z + radius * sin));
            }
        }

        let top: Edge = (0..sides).chain(std::iter::once(0)).collect();
        let bottom: Edge = (sides..2 * sides).chain(std::iter::once(sides)).collect();
        let mut edges = Vec::with_capacity(sides + 2);
        edges.push(top);
        edges.push(bottom);
        edges.extend((0..sides).map(|k| vec![k, sides + k]));

        Self {
            kind: ModelKind::Cylinder,
            vertices,
            edges,
            matrix: Mat4::identity(),
        }
    }

    /// Replace the model-local transform
    pub fn with_matrix(mut self, matrix: Mat4) -> Self {
        self.matrix = matrix;
        self
    }

    /// Number of drawable segments across all edges
    pub fn segment_count(&self) -> usize {
        self.edges.iter().map(|e| e.len().saturating_sub(1)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_layout() {
        let cube = Model::cube(Vec3::new(1.0, 2.0, 3.0), 2.0, 4.0, 6.0);
        assert_eq!(cube.kind, ModelKind::Cube);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.edges.len(), 6);
        assert_eq!(cube.segment_count(), 12);

        assert_eq!(cube.vertices[0], point(0.0, 4.0, 6.0));
        assert_eq!(cube.vertices[2], point(2.0, 0.0, 6.0));
        assert_eq!(cube.vertices[4], point(0.0, 4.0, 0.0));
        assert!(cube.vertices.iter().all(|v| v.w == 1.0));
        assert_eq!(cube.matrix, Mat4::identity());
    }

    #[test]
    fn test_cylinder_layout() {
        let cylinder = Model::cylinder(Vec3::zeros(), 1.0, 2.0, 8);
        assert_eq!(cylinder.vertices.len(), 16);
        assert_eq!(cylinder.edges.len(), 10);
        assert_eq!(cylinder.edges[0], vec![0, 1, 2, 3, 4, 5, 6, 7, 0]);
        assert_eq!(cylinder.edges[1], vec![8, 9, 10, 11, 12, 13, 14, 15, 8]);
        assert_eq!(cylinder.edges[9], vec![7, 15]);
        assert_eq!(cylinder.segment_count(), 24);

        for (k, v) in cylinder.vertices.iter().enumerate() {
            assert!(((v.x * v.x + v.z * v.z).sqrt() - 1.0).abs() < 1e-12);
            assert_eq!(v.y, if k < 8 { 1.0 } else { -1.0 });
        }
    }

    #[test]
    fn test_generic_rejects_bad_index() {
        let vertices = vec![point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0)];
        let err = Model::generic(3, vertices.clone(), vec![vec![0, 1], vec![1, 2]]).unwrap_err();
        assert_eq!(
            err,
            SceneError::EdgeIndexOutOfRange {
                model: 3,
                edge: 1,
                index: 2,
                vertex_count: 2,
            }
        );

        let ok = Model::generic(0, vertices, vec![vec![0, 1, 0], vec![1]]).unwrap();
        assert_eq!(ok.segment_count(), 2);
    }
}
