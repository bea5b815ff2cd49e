//! Discrete camera navigation.
//!
//! Commands are pure functions of the current view. The host collects the
//! commands held during a tick into an [`InputState`] and hands it to the
//! renderer, which applies them in a fixed order before drawing.

use std::collections::BTreeSet;

use crate::config::RenderConfig;
use crate::transform::Vec3;
use crate::view::View;

pub const DEFAULT_MOVE_STEP: f64 = 1.0;
pub const DEFAULT_ROTATE_ANGLE: f64 = 0.5;

/// A navigation command. Declaration order is application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CameraCommand {
    MoveForward,
    MoveLeft,
    MoveBackward,
    MoveRight,
    RotateLeft,
    RotateRight,
}

/// Commands held during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: BTreeSet<CameraCommand>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, command: CameraCommand) {
        self.held.insert(command);
    }

    pub fn release(&mut self, command: CameraCommand) {
        self.held.remove(&command);
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Held commands in application order.
    pub fn commands(&self) -> impl Iterator<Item = CameraCommand> + '_ {
        self.held.iter().copied()
    }
}

impl FromIterator<CameraCommand> for InputState {
    fn from_iter<I: IntoIterator<Item = CameraCommand>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

/// Maps commands to view changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraController {
    pub move_step: f64,
    pub rotate_angle: f64,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_STEP, DEFAULT_ROTATE_ANGLE)
    }
}

impl CameraController {
    pub fn new(move_step: f64, rotate_angle: f64) -> Self {
        Self {
            move_step,
            rotate_angle,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.move_step, config.rotate_angle)
    }

    /// The view after one command.
    pub fn apply(&self, view: &View, command: CameraCommand) -> View {
        let step = self.move_step;
        match command {
            CameraCommand::MoveForward => translated(view, Vec3::new(0.0, 0.0, step)),
            CameraCommand::MoveBackward => translated(view, Vec3::new(0.0, 0.0, -step)),
            CameraCommand::MoveLeft => translated(view, Vec3::new(step, 0.0, 0.0)),
            CameraCommand::MoveRight => translated(view, Vec3::new(-step, 0.0, 0.0)),
            CameraCommand::RotateLeft => turned(view, self.rotate_angle),
            CameraCommand::RotateRight => turned(view, -self.rotate_angle),
        }
    }
}

fn translated(view: &View, offset: Vec3) -> View {
    View {
        prp: view.prp + offset,
        srp: view.srp + offset,
        ..view.clone()
    }
}

/// Swing SRP around PRP about the world y axis.
fn turned(view: &View, angle: f64) -> View {
    let (sin, cos) = angle.sin_cos();
    let d = view.srp - view.prp;
    let rotated = Vec3::new(d.x * cos - d.z * sin, d.y, d.x * sin + d.z * cos);
    View {
        srp: view.prp + rotated,
        ..view.clone()
    }
}
