//! Clock overlay layered over the active scene.

use chrono::Local;
use dreamground_core::{Argb, DrawSurface};
use dreamground_engines::{ActiveScene, Scene, SceneInput};

/// Gap between the clock and the canvas edges, in pixels.
const CLOCK_MARGIN: f32 = 2.0;

/// Input accepted by the render thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostInput {
    Scene(SceneInput),
    ToggleClock,
}

/// The active scene plus the clock drawn on top of it.
#[derive(Debug)]
pub struct HostedScene {
    scene: ActiveScene,
    show_clock: bool,
    clock_color: Argb,
}

impl HostedScene {
    pub fn new(scene: ActiveScene, show_clock: bool, background: Argb) -> Self {
        Self {
            scene,
            show_clock,
            clock_color: clock_color(background),
        }
    }
}

impl Scene for HostedScene {
    type Input = HostInput;

    fn update_canvas(&mut self, canvas: &mut dyn DrawSurface, elapsed_ms: u64) {
        self.scene.update_canvas(canvas, elapsed_ms);
        if self.show_clock {
            let text = Local::now().format("%H:%M:%S").to_string();
            draw_clock(canvas, &text, self.clock_color);
        }
    }

    fn on_input(&mut self, input: HostInput) {
        match input {
            HostInput::Scene(input) => self.scene.on_input(input),
            HostInput::ToggleClock => self.show_clock = !self.show_clock,
        }
    }
}

/// Draw `text` in the top right corner. Skipped when the canvas is too
/// narrow to hold it.
pub fn draw_clock(canvas: &mut dyn DrawSurface, text: &str, color: Argb) {
    let bounds = canvas.measure_text(text);
    let x = canvas.width() as f32 - bounds.width - CLOCK_MARGIN;
    if x < 0.0 || bounds.height + CLOCK_MARGIN > canvas.height() as f32 {
        return;
    }
    canvas.save();
    canvas.translate(x, CLOCK_MARGIN);
    canvas.draw_text(text, 0.0, 0.0, color);
    canvas.restore();
}

/// Readable text color for a background.
pub fn clock_color(background: Argb) -> Argb {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 127.5 { Argb::BLACK } else { Argb::WHITE }
}
