//! wirecam terminal viewer
//!
//! Usage:
//!   wirecam-terminal [--config render.json] [--fps 30] [scene.json]
//!
//! Without a scene file the built-in demo scene is shown.
//! Controls:
//!   - W/S or Up/Down: move along z
//!   - A/D: move along x
//!   - Left/Right: turn
//!   - R: reload the scene file
//!   - Q/ESC: quit
//!
//! Logs go to stderr; redirect it (`2>wirecam.log`) to keep the screen clean.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;
use wirecam_core::{RenderConfig, Scene};
use wirecam_terminal::{TerminalApp, DEMO_SCENE};

struct Args {
    config: Option<PathBuf>,
    fps: Option<u32>,
    scene: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        config: None,
        fps: None,
        scene: None,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--fps" => {
                let fps = iter.next().context("--fps needs a value")?;
                args.fps = Some(fps.parse().with_context(|| format!("invalid --fps {fps}"))?);
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => args.scene = Some(PathBuf::from(path)),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            RenderConfig::from_json_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.target_fps = fps;
    }

    let scene = match &args.scene {
        Some(path) => Scene::from_json_file(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => Scene::from_json_str(DEMO_SCENE).context("loading demo scene")?,
    };
    info!(
        models = scene.models.len(),
        fps = config.target_fps,
        "starting terminal viewer"
    );

    let mut app = TerminalApp::new(scene, &config, args.scene)?;
    app.run()?;

    info!("viewer closed");
    Ok(())
}
