//! Renderer configuration.
//!
//! Loaded from JSON; every field has a default so partial documents work.

use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_MOVE_STEP, DEFAULT_ROTATE_ANGLE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Distance covered by one move command, in world units.
    pub move_step: f64,
    /// Angle covered by one rotate command, in radians.
    pub rotate_angle: f64,
    /// Frame rate the host loop aims for.
    pub target_fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            move_step: DEFAULT_MOVE_STEP,
            rotate_angle: DEFAULT_ROTATE_ANGLE,
            target_fps: 30,
        }
    }
}

impl RenderConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg = RenderConfig::from_json_str(r#"{ "width": 120, "move_step": 0.25 }"#).unwrap();
        assert_eq!(cfg.width, 120);
        assert_eq!(cfg.height, 600);
        assert_eq!(cfg.move_step, 0.25);
        assert_eq!(cfg.rotate_angle, 0.5);
        assert_eq!(cfg.target_fps, 30);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(RenderConfig::from_json_str(r#"{ "fov": 45 }"#).is_err());
    }
}
