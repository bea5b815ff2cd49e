//! Terminal host for the wirecam pipeline

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use wirecam_core::{CameraCommand, FrameStats, InputState, RenderConfig, Renderer, Scene};

pub mod renderer;

pub use renderer::{AsciiCanvas, ENDPOINT_CHAR};

const HELP_TEXT: &str = "WASD=Move Arrows=Turn R=Reload Q=Quit";

/// Scene shown when no file is given
pub const DEMO_SCENE: &str = include_str!("../scenes/demo.json");

/// Key binding used by the terminal host
pub fn key_command(code: KeyCode) -> Option<CameraCommand> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(CameraCommand::MoveForward),
        KeyCode::Char('a') => Some(CameraCommand::MoveLeft),
        KeyCode::Char('s') | KeyCode::Down => Some(CameraCommand::MoveBackward),
        KeyCode::Char('d') => Some(CameraCommand::MoveRight),
        KeyCode::Left => Some(CameraCommand::RotateLeft),
        KeyCode::Right => Some(CameraCommand::RotateRight),
        _ => None,
    }
}

/// Re-read a scene file into `renderer`. On any failure the current scene
/// stays active.
pub fn reload_scene_file(renderer: &mut Renderer, path: &Path) -> wirecam_core::Result<()> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "scene file unreadable; keeping previous scene");
        e
    })?;
    renderer.update_scene_json(&text)
}

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    renderer: Renderer,
    canvas: AsciiCanvas,
    scene_path: Option<PathBuf>,
    target_fps: u32,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    last_stats: FrameStats,
    message: Option<String>,
}

impl TerminalApp {
    pub fn new(
        scene: Scene,
        config: &RenderConfig,
        scene_path: Option<PathBuf>,
    ) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut renderer = Renderer::new(scene, config);
        renderer.resize(width as u32, height as u32);

        Ok(Self {
            renderer,
            canvas: AsciiCanvas::new(width as usize, height as usize),
            scene_path,
            target_fps: config.target_fps.max(1),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            last_stats: FrameStats::default(),
            message: None,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / self.target_fps as u64);

        while self.running {
            let frame_start = Instant::now();

            let input = self.poll_input()?;
            if !self.running {
                break;
            }

            self.render(&input)?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Drain pending terminal events into this frame's input state
    fn poll_input(&mut self) -> io::Result<InputState> {
        let mut input = InputState::new();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                        KeyCode::Char('r') => self.reload_scene(),
                        code => {
                            if let Some(command) = key_command(code) {
                                input.press(command);
                            }
                        }
                    }
                }
                Event::Resize(width, height) => {
                    self.canvas.resize(width as usize, height as usize);
                    self.renderer.resize(width as u32, height as u32);
                }
                _ => {}
            }
        }

        Ok(input)
    }

    fn reload_scene(&mut self) {
        let Some(path) = self.scene_path.clone() else {
            self.message = Some("no scene file to reload".to_string());
            return;
        };

        self.message = Some(match reload_scene_file(&mut self.renderer, &path) {
            Ok(()) => {
                info!(path = %path.display(), "scene reloaded");
                format!("reloaded {}", path.display())
            }
            Err(e) => format!("reload failed: {e}"),
        });
    }

    fn render(&mut self, input: &InputState) -> io::Result<()> {
        if !input.is_empty() {
            self.message = None;
        }
        self.last_stats = self
            .renderer
            .tick(input, &mut self.canvas)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        let prp = self.renderer.view().prp;
        let status = match &self.message {
            Some(message) => message.clone(),
            None => format!(
                "wirecam | FPS: {:.1} | PRP ({:.1}, {:.1}, {:.1}) | {}/{} segments | {}",
                self.fps,
                prp.x,
                prp.y,
                prp.z,
                self.last_stats.drawn,
                self.last_stats.segments,
                HELP_TEXT
            ),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_command(KeyCode::Char('w')), Some(CameraCommand::MoveForward));
        assert_eq!(key_command(KeyCode::Char('a')), Some(CameraCommand::MoveLeft));
        assert_eq!(key_command(KeyCode::Down), Some(CameraCommand::MoveBackward));
        assert_eq!(key_command(KeyCode::Left), Some(CameraCommand::RotateLeft));
        assert_eq!(key_command(KeyCode::Right), Some(CameraCommand::RotateRight));
        assert_eq!(key_command(KeyCode::Char('q')), None);
    }

    #[test]
    fn test_demo_scene_renders_on_canvas() {
        let scene = Scene::from_json_str(DEMO_SCENE).unwrap();
        let config = RenderConfig {
            width: 80,
            height: 24,
            ..RenderConfig::default()
        };
        let viewer = Renderer::new(scene, &config);
        let mut canvas = AsciiCanvas::new(80, 24);

        let stats = viewer.draw(&mut canvas).unwrap();
        assert!(stats.drawn > 0);
        assert!(canvas.rows().iter().any(|r| r.contains(ENDPOINT_CHAR)));
    }

    #[test]
    fn test_reload_goes_through_validated_update() {
        let scene = Scene::from_json_str(DEMO_SCENE).unwrap();
        let mut viewer = Renderer::new(scene.clone(), &RenderConfig::default());

        let mut path = std::env::temp_dir();
        path.push(format!("wirecam-reload-{}.json", std::process::id()));

        // Out-of-range edge index: rejected, demo scene kept
        std::fs::write(
            &path,
            r#"{
                "view": {
                    "prp": [0,0,5], "srp": [0,0,0], "vup": [0,1,0],
                    "clip": [-1,1,-1,1,1,10]
                },
                "models": [ { "type": "generic", "vertices": [[0,0,0]], "edges": [[0,1]] } ]
            }"#,
        )
        .unwrap();
        assert!(reload_scene_file(&mut viewer, &path).is_err());
        assert_eq!(viewer.scene(), &scene);

        std::fs::write(
            &path,
            r#"{
                "view": {
                    "prp": [0,0,9], "srp": [0,0,0], "vup": [0,1,0],
                    "clip": [-1,1,-1,1,1,10]
                },
                "models": []
            }"#,
        )
        .unwrap();
        reload_scene_file(&mut viewer, &path).unwrap();
        assert_eq!(viewer.view().prp.z, 9.0);
        assert!(viewer.scene().models.is_empty());

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            reload_scene_file(&mut viewer, &path),
            Err(wirecam_core::Error::Io(_))
        ));
        assert_eq!(viewer.view().prp.z, 9.0);
    }
}
