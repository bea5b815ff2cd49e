//! Per-frame driver: transform, clip, project, draw.
//!
//! Drawing goes through the [`DrawingPort`] trait so the pipeline runs
//! headless in tests. The host owns the loop and calls [`Renderer::tick`]
//! once per frame; `&mut self` keeps draws from overlapping.

use tracing::{debug, warn};

use crate::camera::{CameraCommand, CameraController, InputState};
use crate::clip::clip_segment;
use crate::config::RenderConfig;
use crate::error::{GeometryError, Result};
use crate::projection::{composite_matrix, project_with, viewport};
use crate::scene::{Scene, SceneDescription};
use crate::transform::Vec4;
use crate::view::View;

/// Where finished 2-D segments go.
pub trait DrawingPort {
    /// Called once at the start of every frame.
    fn clear(&mut self);

    /// Draw a line between two pixel positions and mark both endpoints.
    fn draw_segment(&mut self, x0: f64, y0: f64, x1: f64, y1: f64);
}

/// A port that drops everything; useful for headless timing.
#[derive(Debug, Default)]
pub struct NullPort;

impl DrawingPort for NullPort {
    fn clear(&mut self) {}
    fn draw_segment(&mut self, _x0: f64, _y0: f64, _x1: f64, _y1: f64) {}
}

/// Counters for one drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Consecutive index pairs considered
    pub segments: usize,
    /// Segments handed to the drawing port
    pub drawn: usize,
    /// Segments entirely outside the view volume
    pub rejected: usize,
    /// Segments dropped because an endpoint could not be projected
    pub unprojectable: usize,
}

/// Draw every model edge of `scene` onto a `width` x `height` port.
pub fn render_scene<P: DrawingPort + ?Sized>(
    scene: &Scene,
    width: u32,
    height: u32,
    port: &mut P,
) -> std::result::Result<FrameStats, GeometryError> {
    let composite = composite_matrix(&scene.view)?;
    let z_min = scene.view.z_min();
    let viewport = viewport(width, height);
    let mut stats = FrameStats::default();

    port.clear();

    for (model_index, model) in scene.models.iter().enumerate() {
        let to_canonical = composite * model.matrix;
        let canonical: Vec<Vec4> = model.vertices.iter().map(|v| to_canonical * v).collect();

        for edge in &model.edges {
            for pair in edge.windows(2) {
                stats.segments += 1;

                let (Some(&p0), Some(&p1)) = (canonical.get(pair[0]), canonical.get(pair[1])) else {
                    warn!(model = model_index, ?pair, "edge index out of range; skipping segment");
                    stats.rejected += 1;
                    continue;
                };

                let Some(segment) = clip_segment(p0, p1, z_min) else {
                    stats.rejected += 1;
                    continue;
                };

                match (
                    project_with(&viewport, &segment.start),
                    project_with(&viewport, &segment.end),
                ) {
                    (Some((x0, y0)), Some((x1, y1))) => {
                        port.draw_segment(x0, y0, x1, y1);
                        stats.drawn += 1;
                    }
                    _ => stats.unprojectable += 1,
                }
            }
        }
    }

    debug!(
        models = scene.models.len(),
        segments = stats.segments,
        drawn = stats.drawn,
        rejected = stats.rejected,
        unprojectable = stats.unprojectable,
        "frame rendered"
    );
    Ok(stats)
}

/// Owns the active scene and draws it on request.
pub struct Renderer {
    scene: Scene,
    width: u32,
    height: u32,
    camera: CameraController,
}

impl Renderer {
    pub fn new(scene: Scene, config: &RenderConfig) -> Self {
        Self {
            scene,
            width: config.width,
            height: config.height,
            camera: CameraController::from_config(config),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn view(&self) -> &View {
        &self.scene.view
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Validate `desc` and make it the active scene. On failure the current
    /// scene stays in place.
    pub fn update_scene(&mut self, desc: &SceneDescription) -> Result<()> {
        match Scene::from_description(desc) {
            Ok(scene) => {
                self.scene = scene;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "scene update rejected; keeping previous scene");
                Err(e)
            }
        }
    }

    /// Parse a JSON scene document and make it the active scene.
    pub fn update_scene_json(&mut self, json: &str) -> Result<()> {
        let desc = SceneDescription::from_json_str(json).map_err(|e| {
            warn!(error = %e, "scene document rejected; keeping previous scene");
            e
        })?;
        self.update_scene(&desc)
    }

    /// Apply one camera command. A command that would leave the view
    /// degenerate is refused and the view is left as it was.
    pub fn apply_command(&mut self, command: CameraCommand) -> Result<()> {
        let next = self.camera.apply(&self.scene.view, command);
        if let Err(e) = next.validate() {
            warn!(?command, error = %e, "camera command rejected");
            return Err(e);
        }
        self.scene.view = next;
        Ok(())
    }

    /// Draw the active scene.
    pub fn draw<P: DrawingPort + ?Sized>(&self, port: &mut P) -> Result<FrameStats> {
        Ok(render_scene(&self.scene, self.width, self.height, port)?)
    }

    /// One frame: apply the held commands, then redraw.
    ///
    /// Rejected commands are skipped; the frame is still drawn.
    pub fn tick<P: DrawingPort + ?Sized>(
        &mut self,
        input: &InputState,
        port: &mut P,
    ) -> Result<FrameStats> {
        for command in input.commands() {
            self.apply_command(command).ok();
        }
        self.draw(port)
    }
}
