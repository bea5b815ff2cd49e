//! wirecam core library
//!
//! Turns a declarative scene (a camera plus wireframe models) into 2-D line
//! segments: builds the canonical view volume transform, clips every edge in
//! 3-D against the perspective frustum and maps the survivors to pixels.
//! Drawing and input are left to the host through [`DrawingPort`] and
//! [`InputState`].

pub mod camera;
pub mod clip;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod view;

// Re-export commonly used types
pub use camera::{CameraCommand, CameraController, InputState};
pub use clip::{clip_segment, outcode, Outcode, Segment};
pub use config::RenderConfig;
pub use error::{Error, GeometryError, Result, SceneError};
pub use geometry::{Model, ModelKind};
pub use pipeline::{render_scene, DrawingPort, FrameStats, NullPort, Renderer};
pub use scene::{Scene, SceneDescription};
pub use view::{ClipWindow, View};
