//! The active view's state, dispatched per scene kind.

use dreamground_core::{DrawSurface, RippleSettings, SceneKind, StarrySettings, WaveSettings};

use crate::render::Scene;
use crate::ripple::RippleEngine;
use crate::starry::StarrySky;
use crate::wave::WaveEngine;

/// Pointer and key input forwarded from the UI thread, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneInput {
    PointerDown { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    PointerUp,
    /// Switch the ripple style or the wave normal method.
    ToggleStyle,
}

/// Engine of the currently shown view.
#[derive(Debug)]
pub enum ActiveScene {
    Ripple(RippleEngine),
    Wave(WaveEngine),
    StarrySky(StarrySky),
}

impl ActiveScene {
    pub fn new(
        kind: SceneKind,
        ripple: &RippleSettings,
        wave: &WaveSettings,
        starry: &StarrySettings,
    ) -> Self {
        log::debug!("building {} scene", kind.name());
        match kind {
            SceneKind::Ripple => ActiveScene::Ripple(RippleEngine::new(ripple.clone())),
            SceneKind::Wave => ActiveScene::Wave(WaveEngine::new(wave.clone())),
            SceneKind::StarrySky => ActiveScene::StarrySky(StarrySky::new(starry.clone())),
        }
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            ActiveScene::Ripple(_) => SceneKind::Ripple,
            ActiveScene::Wave(_) => SceneKind::Wave,
            ActiveScene::StarrySky(_) => SceneKind::StarrySky,
        }
    }
}

impl Scene for ActiveScene {
    type Input = SceneInput;

    fn update_canvas(&mut self, canvas: &mut dyn DrawSurface, elapsed_ms: u64) {
        match self {
            ActiveScene::Ripple(engine) => engine.update_canvas(canvas, elapsed_ms),
            ActiveScene::Wave(engine) => engine.update_canvas(canvas),
            ActiveScene::StarrySky(sky) => sky.update_canvas(canvas, elapsed_ms),
        }
    }

    fn on_input(&mut self, input: SceneInput) {
        match (self, input) {
            (ActiveScene::Ripple(engine), SceneInput::PointerDown { x, y }) => engine.touch(x, y),
            (ActiveScene::Ripple(engine), SceneInput::ToggleStyle) => {
                engine.set_style(engine.style().toggle());
            }
            (ActiveScene::Wave(engine), SceneInput::PointerDown { x, .. }) => {
                engine.pointer_down(x);
            }
            (ActiveScene::Wave(engine), SceneInput::PointerMoved { x, .. }) => {
                engine.pointer_moved(x);
            }
            (ActiveScene::Wave(engine), SceneInput::PointerUp) => engine.pointer_up(),
            (ActiveScene::Wave(engine), SceneInput::ToggleStyle) => {
                engine.set_normal_method(engine.normal_method().toggle());
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamground_core::{NormalMethod, RippleStyle};

    fn build(kind: SceneKind) -> ActiveScene {
        ActiveScene::new(
            kind,
            &RippleSettings::default(),
            &WaveSettings::default(),
            &StarrySettings::default(),
        )
    }

    #[test]
    fn test_builds_requested_kind() {
        for kind in [SceneKind::Ripple, SceneKind::Wave, SceneKind::StarrySky] {
            assert_eq!(build(kind).kind(), kind);
        }
    }

    #[test]
    fn test_toggle_style_reaches_engines() {
        let mut ripple = build(SceneKind::Ripple);
        ripple.on_input(SceneInput::ToggleStyle);
        let ActiveScene::Ripple(engine) = &ripple else {
            panic!("expected ripple");
        };
        assert_eq!(engine.style(), RippleStyle::Drop);

        let mut wave = build(SceneKind::Wave);
        wave.on_input(SceneInput::ToggleStyle);
        let ActiveScene::Wave(engine) = &wave else {
            panic!("expected wave");
        };
        assert_eq!(engine.normal_method(), NormalMethod::SingleTriangle);
    }

    #[test]
    fn test_pointer_drag_rolls_wave() {
        let mut wave = build(SceneKind::Wave);
        wave.on_input(SceneInput::PointerDown { x: 0.0, y: 0.0 });
        wave.on_input(SceneInput::PointerMoved { x: 20.0, y: 5.0 });
        wave.on_input(SceneInput::PointerUp);
        let ActiveScene::Wave(engine) = &wave else {
            panic!("expected wave");
        };
        assert_eq!(engine.roll_degrees(), 10.0);
    }

    #[test]
    fn test_starry_ignores_input() {
        let mut sky = build(SceneKind::StarrySky);
        sky.on_input(SceneInput::ToggleStyle);
        assert_eq!(sky.kind(), SceneKind::StarrySky);
    }
}
