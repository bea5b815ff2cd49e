//! JSON scene in, pixel segments out.

use wirecam_core::{
    CameraCommand, DrawingPort, InputState, ModelKind, RenderConfig, Renderer, Scene,
};

#[derive(Default)]
struct Recorder {
    segments: Vec<[f64; 4]>,
}

impl DrawingPort for Recorder {
    fn clear(&mut self) {
        self.segments.clear();
    }

    fn draw_segment(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.segments.push([x0, y0, x1, y1]);
    }
}

const SCENE: &str = r#"{
    "view": {
        "prp": [0, 0, 5],
        "srp": [0, 0, 0],
        "vup": [0, 1, 0],
        "clip": [-1, 1, -1, 1, 1, 10]
    },
    "models": [
        { "type": "cube", "center": [0, 0, 0], "width": 2, "height": 2, "depth": 2 },
        { "type": "cylinder", "center": [0, 0, 0], "radius": 0.5, "height": 1, "sides": 8 },
        {
            "type": "generic",
            "vertices": [[-1, -1, 0], [1, -1, 0], [0, 1, 0]],
            "edges": [[0, 1, 2, 0]]
        }
    ]
}"#;

fn renderer() -> Renderer {
    let config = RenderConfig {
        width: 100,
        height: 100,
        ..RenderConfig::default()
    };
    Renderer::new(Scene::from_json_str(SCENE).unwrap(), &config)
}

#[test]
fn cube_yields_twelve_distinct_segments_inside_the_canvas() {
    let json = r#"{
        "view": {
            "prp": [0, 0, 5], "srp": [0, 0, 0], "vup": [0, 1, 0],
            "clip": [-1, 1, -1, 1, 1, 10]
        },
        "models": [ { "type": "cube", "center": [0, 0, 0], "width": 2, "height": 2, "depth": 2 } ]
    }"#;
    let config = RenderConfig {
        width: 100,
        height: 100,
        ..RenderConfig::default()
    };
    let renderer = Renderer::new(Scene::from_json_str(json).unwrap(), &config);
    let mut port = Recorder::default();
    renderer.draw(&mut port).unwrap();

    assert_eq!(port.segments.len(), 12);
    for (i, a) in port.segments.iter().enumerate() {
        for c in a {
            assert!((-1e-9..=100.0 + 1e-9).contains(c), "{a:?}");
        }
        for b in &port.segments[i + 1..] {
            let same = a.iter().zip(b).all(|(p, q)| (p - q).abs() < 1e-9);
            let reversed = [a[2], a[3], a[0], a[1]]
                .iter()
                .zip(b)
                .all(|(p, q)| (p - q).abs() < 1e-9);
            assert!(!same && !reversed, "duplicate segment {a:?}");
        }
    }
}

#[test]
fn mixed_scene_draws_every_segment() {
    let renderer = renderer();
    let kinds: Vec<_> = renderer.scene().models.iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec![ModelKind::Cube, ModelKind::Cylinder, ModelKind::Generic]);

    let cylinder = &renderer.scene().models[1];
    assert_eq!(cylinder.vertices.len(), 16);
    assert_eq!(cylinder.edges.len(), 10);

    let mut port = Recorder::default();
    let stats = renderer.draw(&mut port).unwrap();
    // 12 cube + 24 cylinder + 3 triangle
    assert_eq!(stats.segments, 39);
    assert_eq!(stats.drawn, 39);
    assert_eq!(port.segments.len(), 39);
}

#[test]
fn turning_away_hides_the_scene() {
    let mut renderer = renderer();
    let mut port = Recorder::default();

    // Six half-radian turns face roughly backwards
    let input: InputState = [CameraCommand::RotateLeft].into_iter().collect();
    for _ in 0..6 {
        renderer.tick(&input, &mut port).unwrap();
    }
    assert!(port.segments.is_empty());

    let input: InputState = [CameraCommand::RotateRight].into_iter().collect();
    let drawn: Vec<_> = (0..6)
        .map(|_| renderer.tick(&input, &mut port).unwrap().drawn)
        .collect();
    assert_eq!(drawn.last(), Some(&39));
}

#[test]
fn walking_through_the_cube_clips_at_the_near_plane() {
    let mut renderer = renderer();
    let mut port = Recorder::default();
    let input: InputState = [CameraCommand::MoveBackward].into_iter().collect();

    // PRP ends at z = 0, inside the cube
    for _ in 0..5 {
        renderer.tick(&input, &mut port).unwrap();
    }
    let stats = renderer.draw(&mut port).unwrap();
    assert!(stats.drawn > 0);
    assert!(stats.rejected > 0);
    assert_eq!(stats.unprojectable, 0);
    for seg in &port.segments {
        assert!(seg.iter().all(|c| (-1e-9..=100.0 + 1e-9).contains(c)));
    }
}
