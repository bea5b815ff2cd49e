//! Scene descriptions and their validation.
//!
//! A [`SceneDescription`] mirrors the JSON document; [`Scene`] is the
//! validated form the pipeline draws. Conversion either succeeds completely
//! or fails without side effects, so a rejected update never replaces a
//! working scene.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};
use crate::geometry::Model;
use crate::transform::{point, Vec3};
use crate::view::{ClipWindow, View};

/// `view` block of a scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewDescription {
    pub prp: [f64; 3],
    pub srp: [f64; 3],
    pub vup: [f64; 3],
    /// `[left, right, bottom, top, near, far]`
    pub clip: [f64; 6],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenericDescription {
    pub vertices: Vec<[f64; 3]>,
    pub edges: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CubeDescription {
    pub center: [f64; 3],
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CylinderDescription {
    pub center: [f64; 3],
    pub radius: f64,
    pub height: f64,
    pub sides: usize,
}

/// One entry of the `models` array, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ModelDescription {
    Generic(GenericDescription),
    Cube(CubeDescription),
    Cylinder(CylinderDescription),
}

/// A scene document as read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    pub view: ViewDescription,
    #[serde(default)]
    pub models: Vec<ModelDescription>,
}

impl SceneDescription {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

impl ViewDescription {
    pub fn to_view(&self) -> Result<View> {
        let view = View::new(
            Vec3::from(self.prp),
            Vec3::from(self.srp),
            Vec3::from(self.vup),
            ClipWindow::from_array(self.clip),
        );
        view.validate()?;
        Ok(view)
    }
}

impl ModelDescription {
    /// Build the model; `index` is its position in the scene, used in errors.
    pub fn to_model(&self, index: usize) -> Result<Model> {
        let invalid = |message: &str| SceneError::InvalidModel {
            model: index,
            message: message.to_string(),
        };
        let finite = |values: &[f64]| values.iter().all(|v| v.is_finite());

        let model = match self {
            Self::Generic(desc) => {
                if !desc.vertices.iter().all(|v| finite(&v[..])) {
                    return Err(invalid("vertex coordinates must be finite").into());
                }
                let vertices = desc.vertices.iter().map(|&[x, y, z]| point(x, y, z)).collect();
                Model::generic(index, vertices, desc.edges.clone())?
            }
            Self::Cube(desc) => {
                if !finite(&desc.center[..]) {
                    return Err(invalid("center must be finite").into());
                }
                let dims = [desc.width, desc.height, desc.depth];
                if !dims.iter().all(|d| d.is_finite() && *d > 0.0) {
                    return Err(invalid("cube width, height and depth must be positive").into());
                }
                Model::cube(Vec3::from(desc.center), desc.width, desc.height, desc.depth)
            }
            Self::Cylinder(desc) => {
                if !finite(&desc.center[..]) {
                    return Err(invalid("center must be finite").into());
                }
                if !(desc.radius.is_finite() && desc.radius > 0.0) {
                    return Err(invalid("cylinder radius must be positive").into());
                }
                if !(desc.height.is_finite() && desc.height > 0.0) {
                    return Err(invalid("cylinder height must be positive").into());
                }
                if desc.sides < 3 {
                    return Err(invalid("cylinder needs at least 3 sides").into());
                }
                Model::cylinder(Vec3::from(desc.center), desc.radius, desc.height, desc.sides)
            }
        };
        Ok(model)
    }
}

/// A validated scene: one view and the models in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub view: View,
    pub models: Vec<Model>,
}

impl Scene {
    pub fn new(view: View, models: Vec<Model>) -> Self {
        Self { view, models }
    }

    pub fn from_description(desc: &SceneDescription) -> Result<Self> {
        let view = desc.view.to_view()?;
        let models = desc
            .models
            .iter()
            .enumerate()
            .map(|(i, m)| m.to_model(i))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { view, models })
    }

    /// Parse and validate a JSON scene document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_description(&SceneDescription::from_json_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
